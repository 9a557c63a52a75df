use crate::db::pins::PinSet;
use crate::error::DescriptorError;
use crate::geom::coord::GridCoord;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static POINT_RECORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<point\b[^>]*?/>").expect("point record pattern"));
static X_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\bx="([0-9]+)""#).expect("x attribute pattern"));
static Y_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\by="([0-9]+)""#).expect("y attribute pattern"));

pub fn parse(filename: &Path, size: u32) -> Result<PinSet, DescriptorError> {
    let text = std::fs::read_to_string(filename).map_err(|source| DescriptorError::Io {
        path: filename.to_path_buf(),
        source,
    })?;
    parse_str(&text, size)
}

/// Collects every `<point x="..." y="..."/>` record in document order.
pub fn parse_str(text: &str, size: u32) -> Result<PinSet, DescriptorError> {
    let mut pins = PinSet::new(size);

    for record in POINT_RECORD.find_iter(text) {
        let record = record.as_str();
        let (Some(x), Some(y)) = (X_ATTR.captures(record), Y_ATTR.captures(record)) else {
            return Err(DescriptorError::MissingCoordinates {
                record: record.to_string(),
            });
        };

        let coord = |m: &str| {
            m.parse::<u32>()
                .map_err(|_| DescriptorError::InvalidCoordinate {
                    record: record.to_string(),
                })
        };
        let pos = GridCoord::new(coord(&x[1])?, coord(&y[1])?);

        if !pins.add_pin(pos)? {
            log::warn!("Duplicate pin {} ignored.", pos);
        }
    }

    if pins.is_empty() {
        return Err(DescriptorError::Empty);
    }

    log::info!("Read {} pins.", pins.len());
    Ok(pins)
}
