//! Content hashing for file-backed values
//!
//! MD5 digests feed identity derivation, where speed matters and collision
//! resistance does not. SHA-512 digests are recorded on file entities as a
//! verifiable content attribute.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use md5::Md5;
use sha2::{Digest, Sha512};

use crate::error::{CaptureError, Result};

const CHUNK_SIZE: usize = 8192;

/// MD5 digest of a file's contents, as lowercase hex
pub fn hash_file_md5(path: &Path) -> Result<String> {
    hash_file::<Md5>(path)
}

/// SHA-512 digest of a file's contents, as lowercase hex
pub fn hash_file_sha512(path: &Path) -> Result<String> {
    hash_file::<Sha512>(path)
}

/// Stream the file through the digest in fixed-size chunks
fn hash_file<D: Digest>(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|source| CaptureError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    let mut hasher = D::new();
    let mut buf = [0u8; CHUNK_SIZE];
    loop {
        let n = file.read(&mut buf).map_err(|source| CaptureError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(hex(&hasher.finalize()))
}

/// Lowercase hex encoding
pub(crate) fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// MD5 digest of a byte string, as lowercase hex
pub(crate) fn md5_hex(data: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(data);
    hex(&hasher.finalize())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_md5_known_digest() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"abc").unwrap();
        let digest = hash_file_md5(file.path()).unwrap();
        assert_eq!(digest, "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_md5_empty_file() {
        let file = NamedTempFile::new().unwrap();
        let digest = hash_file_md5(file.path()).unwrap();
        assert_eq!(digest, "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_sha512_known_digest() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"abc").unwrap();
        let digest = hash_file_sha512(file.path()).unwrap();
        assert_eq!(
            digest,
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = hash_file_md5(Path::new("/nonexistent/file")).unwrap_err();
        assert!(matches!(err, CaptureError::FileAccess { .. }));
    }

    #[test]
    fn test_md5_hex_of_bytes() {
        assert_eq!(md5_hex(b"abc"), "900150983cd24fb0d6963f7d28e17f72");
    }
}
