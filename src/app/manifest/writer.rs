//! Atomic manifest output
//!
//! The document is encoded completely in memory, written to a temporary file
//! next to the destination and renamed into place. On failure the temporary
//! file is removed, so a reader never sees a partial manifest at the output
//! path.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::app::manifest::codec::encode;
use crate::app::models::ManifestDocument;
use crate::constants::TEMP_FILE_SUFFIX;
use crate::errors::{ManifestError, ManifestResult};

/// Writes manifest documents to disk
#[derive(Debug, Default, Clone, Copy)]
pub struct ManifestWriter;

impl ManifestWriter {
    pub fn new() -> Self {
        Self
    }

    /// Encode `doc` and atomically replace `output_path` with it
    ///
    /// # Errors
    ///
    /// `ManifestError::Write` for any I/O failure; the output path is left
    /// untouched in that case
    pub async fn write(&self, doc: &ManifestDocument, output_path: &Path) -> ManifestResult<()> {
        let bytes = encode(doc)?;
        let temp_path = temp_path_for(output_path);

        let write_error = |source: std::io::Error| ManifestError::Write {
            path: output_path.to_path_buf(),
            source,
        };

        debug!(
            "Writing {} bytes to temporary file {}",
            bytes.len(),
            temp_path.display()
        );

        let result = async {
            tokio::fs::write(&temp_path, &bytes).await?;
            tokio::fs::rename(&temp_path, output_path).await
        }
        .await;

        if let Err(source) = result {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(write_error(source));
        }

        info!(
            "Wrote manifest with {} files to {}",
            doc.product.files.len(),
            output_path.display()
        );
        Ok(())
    }
}

/// Write a manifest document atomically
pub async fn write_manifest(doc: &ManifestDocument, output_path: &Path) -> ManifestResult<()> {
    ManifestWriter::new().write(doc, output_path).await
}

/// Temporary sibling of `output_path`, unique per process
///
/// `out/manifest.json` becomes `out/manifest.json.<pid>.tmp`, so the rename
/// never crosses a filesystem boundary.
fn temp_path_for(output_path: &Path) -> PathBuf {
    let mut name = output_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "manifest".into());
    name.push(format!(".{}{}", std::process::id(), TEMP_FILE_SUFFIX));
    output_path.with_file_name(name)
}
