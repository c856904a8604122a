use std::io::{self, Write};

use pcm_core::{PointCloudMap, FORMAT_VERSION};

pub const FILE_KIND_HEADER: &str = "# Point Cloud File";

/// Writes `map` in the PCM text layout: the two header lines, the reference
/// block in id order, then the point block in insertion order. Each block is
/// framed by blank lines.
pub fn write_pcm<W: Write>(map: &PointCloudMap, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{FILE_KIND_HEADER}")?;
    writeln!(writer, "# Version {FORMAT_VERSION}")?;

    writeln!(writer)?;
    for (id, reference) in map.references.iter() {
        writeln!(writer, "ref {id} {reference}")?;
    }
    writeln!(writer)?;

    writeln!(writer)?;
    for point in map.points.iter() {
        writeln!(writer, "{point}")?;
    }
    writeln!(writer)?;

    Ok(())
}

pub fn to_pcm_string(map: &PointCloudMap) -> String {
    let mut buffer = Vec::new();
    // writing into a Vec<u8> cannot fail
    let _ = write_pcm(map, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}
