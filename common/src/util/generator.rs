use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes a pin descriptor with `count` distinct random pins on a
/// `size x size` grid. The same seed always yields the same file.
pub fn generate_random_pins(
    filename: &Path,
    count: usize,
    size: u32,
    seed: u64,
) -> std::io::Result<usize> {
    let capacity = (size as usize) * (size as usize);
    let count = count.min(capacity);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut seen = HashSet::with_capacity(count);
    let mut pins = Vec::with_capacity(count);
    while pins.len() < count {
        let p = (rng.gen_range(0..size), rng.gen_range(0..size));
        if seen.insert(p) {
            pins.push(p);
        }
    }

    log::info!(
        "Generating Benchmark: {} pins on a {}x{} grid (seed {})",
        count,
        size,
        size,
        seed
    );

    let mut file = BufWriter::new(File::create(filename)?);
    writeln!(file, "<root>")?;
    writeln!(
        file,
        "<grid min_x=\"0\" max_x=\"{}\" min_y=\"0\" max_y=\"{}\"/>",
        size, size
    )?;
    writeln!(file, "<net>")?;
    for (x, y) in &pins {
        writeln!(
            file,
            "<point x=\"{}\" y=\"{}\" layer=\"pins\" type=\"pin\"/>",
            x, y
        )?;
    }
    writeln!(file, "</net>")?;
    write!(file, "</root>")?;
    file.flush()?;

    Ok(count)
}
