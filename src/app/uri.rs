//! Bucket address normalization and file URI construction
//!
//! The bucket base is parsed as a URL once, reduced to a canonical form
//! (empty path segments dropped, no query or fragment, no trailing slash)
//! and then joined with each file name through the run's [`UriTemplate`].
//! Whatever separators the caller supplied, a built URI never contains an
//! empty path segment.

use std::fmt;
use std::str::FromStr;

use tracing::debug;
use url::Url;

use crate::app::models::FileType;
use crate::app::schema::UriTemplate;
use crate::errors::{ManifestError, ManifestResult};

/// A normalized bucket base address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketBase {
    url: Url,
    /// Canonical base without a trailing separator
    base: String,
}

impl BucketBase {
    /// Parse and normalize a bucket base address
    ///
    /// # Errors
    ///
    /// `ManifestError::InvalidBucket` if the address is not a URL or cannot
    /// carry a path (e.g., `mailto:` addresses)
    pub fn parse(raw: &str) -> ManifestResult<Self> {
        let invalid = |reason: String| ManifestError::InvalidBucket {
            url: raw.to_string(),
            reason,
        };

        let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(invalid("address cannot carry a path".to_string()));
        }

        if url.query().is_some() || url.fragment().is_some() {
            debug!("Dropping query/fragment from bucket address {}", raw);
            url.set_query(None);
            url.set_fragment(None);
        }

        let segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();
        let path = if segments.is_empty() {
            String::new()
        } else {
            format!("/{}", segments.join("/"))
        };
        url.set_path(&path);

        // Special schemes always serialize a root "/"; strip exactly one so
        // "file:///" keeps its authority separator
        let serialized = url.as_str();
        let base = serialized
            .strip_suffix('/')
            .unwrap_or(serialized)
            .to_string();

        Ok(Self { url, base })
    }

    /// Canonical base address without a trailing separator
    pub fn as_str(&self) -> &str {
        &self.base
    }

    /// Build the URI of one file under this base
    ///
    /// The file name is pushed as a single path segment, so characters such
    /// as ` `, `#`, `?`, `%` and `/` are percent-encoded.
    pub fn uri_for(&self, filename: &str, file_type: FileType, template: UriTemplate) -> String {
        let mut url = self.url.clone();
        match url.path_segments_mut() {
            Ok(mut segments) => {
                segments
                    .pop_if_empty()
                    .extend(template.prefix_for(file_type))
                    .push(filename);
            }
            // Rejected by `parse`
            Err(()) => return format!("{}/{}", self.base, filename),
        }
        url.into()
    }
}

impl fmt::Display for BucketBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}

impl FromStr for BucketBase {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Normalize `bucket_base` and join it with `filename`
///
/// Convenience wrapper for one-off URIs; the manifest builder parses the
/// bucket once and reuses the [`BucketBase`].
pub fn build_uri(
    bucket_base: &str,
    filename: &str,
    file_type: FileType,
    template: UriTemplate,
) -> ManifestResult<String> {
    Ok(BucketBase::parse(bucket_base)?.uri_for(filename, file_type, template))
}
