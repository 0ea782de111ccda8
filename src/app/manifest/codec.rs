//! Versioned JSON encoding of manifest documents
//!
//! Nested layout (1.4, 1.5):
//!
//! ```text
//! {"collection": .., "identifier"|"id": .., "version": .., "product": {"name": .., "files": [..]}}
//! ```
//!
//! Flat layout (1.3):
//!
//! ```text
//! {"collection": .., "id": .., "version": .., "productName": .., "files": [..]}
//! ```
//!
//! Decoding reads `version` first and rejects documents whose layout or
//! identifier key disagrees with it, so `decode(encode(doc)) == doc`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::app::hash::Checksum;
use crate::app::models::{FileRecord, ManifestDocument, Product};
use crate::app::schema::{ManifestLayout, SchemaVersion};
use crate::errors::{ManifestError, ManifestResult};

/// On-disk shape covering every schema version
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct WireManifest {
    collection: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    product: Option<WireProduct>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    files: Option<Vec<FileRecord>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct WireProduct {
    name: String,
    files: Vec<FileRecord>,
}

impl WireManifest {
    fn from_document(doc: &ManifestDocument) -> Self {
        let schema = doc.schema_version;
        let identifier = Some(doc.product_identifier.clone());
        let (identifier, id) = match schema.identifier_key() {
            "identifier" => (identifier, None),
            _ => (None, identifier),
        };

        let (product_name, product, files) = match schema.layout() {
            ManifestLayout::Nested => (
                None,
                Some(WireProduct {
                    name: doc.product.name.clone(),
                    files: doc.product.files.clone(),
                }),
                None,
            ),
            ManifestLayout::Flat => (
                Some(doc.product.name.clone()),
                None,
                Some(doc.product.files.clone()),
            ),
        };

        Self {
            collection: doc.collection_id.clone(),
            identifier,
            id,
            version: schema.as_str().to_string(),
            product_name,
            product,
            files,
        }
    }

    fn into_document(self) -> ManifestResult<ManifestDocument> {
        let schema = SchemaVersion::parse(&self.version)?;
        let invalid = |reason: String| ManifestError::InvalidFormat { reason };

        let product_identifier = match (schema.identifier_key(), self.identifier, self.id) {
            ("identifier", Some(identifier), None) => identifier,
            ("id", None, Some(id)) => id,
            (key, _, _) => {
                return Err(invalid(format!(
                    "version {} requires exactly one '{}' key",
                    schema, key
                )))
            }
        };

        let product = match (schema.layout(), self.product, self.product_name, self.files) {
            (ManifestLayout::Nested, Some(product), None, None) => Product {
                name: product.name,
                files: product.files,
            },
            (ManifestLayout::Flat, None, Some(name), Some(files)) => Product { name, files },
            (layout, _, _, _) => {
                return Err(invalid(format!(
                    "version {} requires the {} layout",
                    schema,
                    match layout {
                        ManifestLayout::Nested => "nested 'product'",
                        ManifestLayout::Flat => "flat 'productName'/'files'",
                    }
                )))
            }
        };

        for file in &product.files {
            Checksum::from_hex(file.checksum_algorithm, &file.checksum)?;
        }

        Ok(ManifestDocument {
            collection_id: self.collection,
            product_identifier,
            schema_version: schema,
            product,
        })
    }
}

/// Serialize a document in its schema's format (pretty JSON, trailing newline)
pub fn encode(doc: &ManifestDocument) -> ManifestResult<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(&WireManifest::from_document(doc))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Parse a document, validating it against its declared schema version
pub fn decode(bytes: &[u8]) -> ManifestResult<ManifestDocument> {
    let wire: WireManifest = serde_json::from_slice(bytes)?;
    wire.into_document()
}

/// Read and decode a manifest file
pub async fn read_manifest(path: &Path) -> ManifestResult<ManifestDocument> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    decode(&bytes)
}
