use crate::db::core::{Grid, RouteSegment, WireLayer};
use crate::error::DescriptorError;
use crate::geom::coord::GridCoord;
use crate::util::config::OutputConfig;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Merges set connectivity bits into maximal straight runs.
///
/// Line `k` yields the vertical runs of column `x = k` and the horizontal
/// runs of row `y = k`; runs are emitted in the order they close.
pub fn collect_segments(grid: &Grid) -> Vec<RouteSegment> {
    let size = grid.size();
    let mut segments = Vec::new();

    for k in 0..size {
        let mut vertical_run: Option<(u32, u32)> = None;
        let mut horizontal_run: Option<(u32, u32)> = None;

        for m in 0..size.saturating_sub(1) {
            if grid.get_vertical(k, m) {
                vertical_run = Some(match vertical_run {
                    Some((start, _)) => (start, m + 1),
                    None => (m, m + 1),
                });
            } else if let Some((start, end)) = vertical_run.take() {
                segments.push(vertical_segment(k, start, end));
            }

            if grid.get_horizontal(m, k) {
                horizontal_run = Some(match horizontal_run {
                    Some((start, _)) => (start, m + 1),
                    None => (m, m + 1),
                });
            } else if let Some((start, end)) = horizontal_run.take() {
                segments.push(horizontal_segment(k, start, end));
            }
        }

        if let Some((start, end)) = vertical_run {
            segments.push(vertical_segment(k, start, end));
        }
        if let Some((start, end)) = horizontal_run {
            segments.push(horizontal_segment(k, start, end));
        }
    }
    segments
}

fn vertical_segment(x: u32, y1: u32, y2: u32) -> RouteSegment {
    RouteSegment {
        layer: WireLayer::Vertical,
        p1: GridCoord::new(x, y1),
        p2: GridCoord::new(x, y2),
    }
}

fn horizontal_segment(y: u32, x1: u32, x2: u32) -> RouteSegment {
    RouteSegment {
        layer: WireLayer::Horizontal,
        p1: GridCoord::new(x1, y),
        p2: GridCoord::new(x2, y),
    }
}

pub fn write_xml(grid: &Grid, filename: &Path, layers: &OutputConfig) -> Result<(), DescriptorError> {
    let io_err = |source| DescriptorError::Io {
        path: filename.to_path_buf(),
        source,
    };
    let file = File::create(filename).map_err(io_err)?;
    let mut out = BufWriter::new(file);
    write_document(grid, layers, &mut out).map_err(io_err)?;
    out.flush().map_err(io_err)?;
    Ok(())
}

pub fn render_xml(grid: &Grid, layers: &OutputConfig) -> std::io::Result<String> {
    let mut buf = Vec::new();
    write_document(grid, layers, &mut buf)?;
    String::from_utf8(buf).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

pub fn write_document<W: Write>(
    grid: &Grid,
    layers: &OutputConfig,
    out: &mut W,
) -> std::io::Result<()> {
    let size = grid.size();
    writeln!(out, "<root>")?;
    writeln!(
        out,
        "<grid min_x=\"0\" max_x=\"{}\" min_y=\"0\" max_y=\"{}\"/>",
        size, size
    )?;
    writeln!(out, "<net>")?;

    for x in 0..size {
        for y in 0..size {
            let pos = GridCoord::new(x, y);
            let has_h = grid.touches_horizontal(pos);
            let has_v = grid.touches_vertical(pos);

            if has_h && has_v {
                write_point(out, pos, &layers.via_layer, "via")?;
            }

            if grid.is_pin(pos) {
                write_point(out, pos, &layers.pin_layer, "pin")?;
                if has_h || has_v {
                    write_point(out, pos, &layers.pin_via_layer, "via")?;
                    // Pins land on the horizontal layer; a vertical-only pin
                    // needs a via up and a zero-length stub.
                    if !has_h {
                        write_point(out, pos, &layers.via_layer, "via")?;
                        write_segment(out, pos, pos, &layers.horizontal_layer)?;
                    }
                }
            }
        }
    }

    for seg in collect_segments(grid) {
        let layer = match seg.layer {
            WireLayer::Horizontal => &layers.horizontal_layer,
            WireLayer::Vertical => &layers.vertical_layer,
        };
        write_segment(out, seg.p1, seg.p2, layer)?;
    }

    writeln!(out, "</net>")?;
    write!(out, "</root>")?;
    Ok(())
}

fn write_point<W: Write>(out: &mut W, p: GridCoord, layer: &str, kind: &str) -> std::io::Result<()> {
    writeln!(
        out,
        "<point x=\"{}\" y=\"{}\" layer=\"{}\" type=\"{}\"/>",
        p.x, p.y, layer, kind
    )
}

fn write_segment<W: Write>(
    out: &mut W,
    p1: GridCoord,
    p2: GridCoord,
    layer: &str,
) -> std::io::Result<()> {
    writeln!(
        out,
        "<segment x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" layer=\"{}\"/>",
        p1.x, p1.y, p2.x, p2.y, layer
    )
}
