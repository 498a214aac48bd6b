//! Plain-text point cloud dumps for external plotting.
//!
//! One line per valid point, `x y mass`. Comparison dumps hold two blocks
//! separated by a blank line, each introduced by a `#` comment, which
//! gnuplot reads as `index 0` and `index 1`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::PointCloud;
use crate::error::Result;

/// Write the valid points of `cloud`.
pub fn write_points<W: Write>(writer: &mut W, cloud: &PointCloud) -> Result<()> {
    for p in cloud.iter().filter(|p| !p.invalid) {
        writeln!(writer, "{} {} {}", p.x, p.y, p.mass)?;
    }
    Ok(())
}

/// Dump `cloud` to `path`.
pub fn write_point_cloud<P: AsRef<Path>>(path: P, cloud: &PointCloud) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    write_points(&mut writer, cloud)?;
    writer.flush()?;
    log::debug!(
        "Wrote {} points to {}",
        cloud.len() - (cloud.iter().filter(|p| p.invalid).count()),
        path.as_ref().display()
    );
    Ok(())
}

/// Dump a reference and an aligned candidate to one file.
pub fn write_comparison<P: AsRef<Path>>(
    path: P,
    reference: &PointCloud,
    candidate: &PointCloud,
) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    writeln!(writer, "# reference")?;
    write_points(&mut writer, reference)?;
    writeln!(writer)?;
    writeln!(writer, "# candidate")?;
    write_points(&mut writer, candidate)?;
    writer.flush()?;
    Ok(())
}
