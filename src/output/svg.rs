//! SVG chart output writer.

use super::prepare_output_path;
use crate::utils::error::OutputError;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write SVG content to a file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is invalid
pub fn write_svg(svg_content: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing SVG to: {}", output_path.display());

    prepare_output_path(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(svg_content.as_bytes())
        .map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!(
        "SVG written successfully ({:.2} KB)",
        svg_content.len() as f64 / 1024.0
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_svg_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("charts/daily_revenue.svg");

        write_svg("<svg></svg>", &path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<svg></svg>");
    }

    #[test]
    fn test_write_svg_rejects_directory() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            write_svg("<svg></svg>", dir.path()),
            Err(OutputError::InvalidPath(_))
        ));
    }
}
