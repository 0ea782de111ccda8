//! Extension-based file classification
//!
//! Output files are tagged by a static, per-schema extension table. Matching
//! is an exact, case-sensitive suffix test and the first rule in table order
//! wins. Files no rule matches are left out of the manifest; that is not an
//! error.

use crate::app::models::FileType;
use crate::app::schema::{ExtensionRule, SchemaVersion};

/// Outcome of classifying one file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Type of the first matching rule, if any
    pub file_type: Option<FileType>,
    /// Suffix of the matching rule (e.g., ".tif")
    pub suffix: Option<&'static str>,
}

impl Classification {
    const UNMATCHED: Self = Self {
        file_type: None,
        suffix: None,
    };

    /// Whether the file belongs in the manifest
    pub fn matches(&self) -> bool {
        self.file_type.is_some()
    }
}

/// Classifies file names against one schema's extension table
#[derive(Debug, Clone, Copy)]
pub struct FileClassifier {
    rules: &'static [ExtensionRule],
}

impl FileClassifier {
    pub fn new(schema: SchemaVersion) -> Self {
        Self {
            rules: schema.extension_rules(),
        }
    }

    /// Classify a file's base name
    pub fn classify(&self, filename: &str) -> Classification {
        self.rules
            .iter()
            .find(|rule| filename.ends_with(rule.suffix))
            .map(|rule| Classification {
                file_type: Some(rule.file_type),
                suffix: Some(rule.suffix),
            })
            .unwrap_or(Classification::UNMATCHED)
    }
}

/// Strip a matched suffix to get the product-style stem
///
/// `"HLS.S30.T52SCG.2019253.v1.5.B01.tif"` with `".tif"` gives
/// `"HLS.S30.T52SCG.2019253.v1.5.B01"`.
pub fn stem<'a>(filename: &'a str, suffix: &str) -> &'a str {
    filename.strip_suffix(suffix).unwrap_or(filename)
}
