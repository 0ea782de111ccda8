//! Sentinel-2 granule directory lookup
//!
//! A Level-1C SAFE product holds its tile data under `GRANULE/<granule id>/`.
//! The id's naming depends on the SAFE format: current products carry
//! `MTD_MSIL1C.xml` at the root and name granules `L1C_*`, older ones lack
//! that file and use `S2?_OPER_MSI_L1C_TL_*`.

use std::path::Path;

use tracing::debug;

use crate::constants::sentinel;
use crate::errors::{ToolError, ToolResult};

/// Base name of the product's granule directory, or `""` when there is none
///
/// Entries are examined in name order so the answer is stable when a product
/// holds more than one match.
pub fn locate_granule_dir(product_root: &Path) -> ToolResult<String> {
    let old_format = !product_root
        .join(sentinel::PRODUCT_METADATA_FILE)
        .is_file();
    let marker = if old_format {
        sentinel::OLD_GRANULE_MARKER
    } else {
        sentinel::NEW_GRANULE_MARKER
    };

    let granule_root = product_root.join(sentinel::GRANULE_DIR);
    if !granule_root.is_dir() {
        debug!("No granule directory under {}", product_root.display());
        return Ok(String::new());
    }

    let io_error = |source: std::io::Error| ToolError::Io {
        path: granule_root.clone(),
        source,
    };

    let mut names = Vec::new();
    for entry in std::fs::read_dir(&granule_root).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        if entry.path().is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();

    Ok(names
        .into_iter()
        .find(|name| name.contains(marker))
        .unwrap_or_default())
}
