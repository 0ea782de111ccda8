//! File checksums
//!
//! This module provides the [`Checksum`] value type and the streaming digest
//! used to fill in each manifest file record. Files are read in fixed 8KB
//! chunks so peak memory is independent of file size; the same pass counts
//! the bytes, so the recorded size always describes the hashed content.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha512};
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::constants::DIGEST_CHUNK_SIZE;
use crate::errors::{ManifestError, ManifestResult};

/// Digest algorithms a manifest may record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChecksumAlgorithm {
    /// Legacy manifests
    #[serde(rename = "MD5")]
    Md5,
    /// Current manifests
    #[serde(rename = "SHA512")]
    Sha512,
}

impl ChecksumAlgorithm {
    /// Raw digest length in bytes
    pub fn digest_len(&self) -> usize {
        match self {
            Self::Md5 => 16,
            Self::Sha512 => 64,
        }
    }

    /// Name as written in the `checksumType` field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::Sha512 => "SHA512",
        }
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChecksumAlgorithm {
    type Err = String;

    /// Accepts the wire names and their lowercase/hyphenated spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md5" => Ok(Self::Md5),
            "sha512" | "sha-512" => Ok(Self::Sha512),
            other => Err(format!(
                "unknown checksum algorithm '{}', expected 'md5' or 'sha512'",
                other
            )),
        }
    }
}

/// A computed digest together with the algorithm that produced it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Checksum {
    algorithm: ChecksumAlgorithm,
    bytes: Vec<u8>,
}

impl Checksum {
    /// Create a checksum from a hex string
    ///
    /// # Arguments
    ///
    /// * `algorithm` - Algorithm the digest claims to come from
    /// * `hex` - Hexadecimal digest (case insensitive)
    ///
    /// # Returns
    ///
    /// `Err(ManifestError::InvalidHash)` if the string is not hex or its
    /// length does not match the algorithm
    pub fn from_hex(algorithm: ChecksumAlgorithm, hex: &str) -> ManifestResult<Self> {
        let bytes = hex::decode(hex).map_err(|_| ManifestError::InvalidHash {
            hash: hex.to_string(),
        })?;

        if bytes.len() != algorithm.digest_len() {
            return Err(ManifestError::InvalidHash {
                hash: hex.to_string(),
            });
        }

        Ok(Self { algorithm, bytes })
    }

    /// Lowercase hexadecimal representation
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    pub fn algorithm(&self) -> ChecksumAlgorithm {
        self.algorithm
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Incremental digest over either supported algorithm
pub enum StreamingHasher {
    Md5(md5::Context),
    Sha512(Sha512),
}

impl StreamingHasher {
    pub fn new(algorithm: ChecksumAlgorithm) -> Self {
        match algorithm {
            ChecksumAlgorithm::Md5 => Self::Md5(md5::Context::new()),
            ChecksumAlgorithm::Sha512 => Self::Sha512(Sha512::new()),
        }
    }

    pub fn update(&mut self, data: &[u8]) {
        match self {
            Self::Md5(ctx) => ctx.consume(data),
            Self::Sha512(hasher) => hasher.update(data),
        }
    }

    pub fn finalize(self) -> Checksum {
        match self {
            Self::Md5(ctx) => Checksum {
                algorithm: ChecksumAlgorithm::Md5,
                bytes: ctx.compute().0.to_vec(),
            },
            Self::Sha512(hasher) => Checksum {
                algorithm: ChecksumAlgorithm::Sha512,
                bytes: hasher.finalize().to_vec(),
            },
        }
    }
}

/// Result of streaming one file through a digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDigest {
    pub checksum: Checksum,
    /// Bytes read, i.e. the file's size at read time
    pub size_bytes: u64,
}

/// Digest a file's full content in fixed-size chunks
///
/// The file handle is dropped on every return path. Any open or read failure
/// (including the file disappearing mid-stream) is reported as
/// `ManifestError::Read` for that path.
pub async fn digest_file(path: &Path, algorithm: ChecksumAlgorithm) -> ManifestResult<FileDigest> {
    let read_error = |source: std::io::Error| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).await.map_err(read_error)?;
    let mut hasher = StreamingHasher::new(algorithm);
    let mut buffer = vec![0u8; DIGEST_CHUNK_SIZE];
    let mut size_bytes = 0u64;

    loop {
        let n = file.read(&mut buffer).await.map_err(read_error)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
        size_bytes += n as u64;
    }

    let checksum = hasher.finalize();
    debug!(
        "{} {} ({} bytes) {}",
        algorithm,
        path.display(),
        size_bytes,
        checksum
    );

    Ok(FileDigest {
        checksum,
        size_bytes,
    })
}
