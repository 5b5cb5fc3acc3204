//! File to base64 data URI conversion.

use std::fs;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{Error, Result};

/// Prefix of every URI produced by [`data_uri`].
///
/// The MIME type is always `image/png`, whatever the file actually holds.
pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Read a whole file and return its standard, padded base64 encoding.
pub fn encode_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| Error::ImageRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(encode_bytes(&bytes))
}

pub fn encode_bytes(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Wrap a base64 payload in an `image/png` data URI.
pub fn data_uri(payload: &str) -> String {
    format!("{DATA_URI_PREFIX}{payload}")
}

#[cfg(test)]
mod tests {
    use std::io::ErrorKind;

    use proptest::prelude::*;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_encode_bytes_padding() {
        assert_eq!(encode_bytes(b""), "");
        assert_eq!(encode_bytes(b"f"), "Zg==");
        assert_eq!(encode_bytes(b"fo"), "Zm8=");
        assert_eq!(encode_bytes(b"foo"), "Zm9v");
        assert_eq!(encode_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]), "/9j/4A==");
    }

    #[test]
    fn test_encode_uses_standard_alphabet() {
        // 0xFB 0xFF encodes to characters from the +/ end of the alphabet
        assert_eq!(encode_bytes(&[0xFB, 0xFF, 0xBF]), "+/+/");
    }

    #[test]
    fn test_encode_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pic.png");
        fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        assert_eq!(encode_file(&path).unwrap(), "iVBORw==");
    }

    #[test]
    fn test_encode_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.png");

        match encode_file(&path) {
            Err(Error::ImageRead { path: p, source }) => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), ErrorKind::NotFound);
            }
            other => panic!("expected ImageRead error, got {other:?}"),
        }
    }

    #[test]
    fn test_encode_directory_fails() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            encode_file(dir.path()),
            Err(Error::ImageRead { .. })
        ));
    }

    #[test]
    fn test_data_uri() {
        assert_eq!(data_uri("AAAA"), "data:image/png;base64,AAAA");
    }

    proptest! {
        #[test]
        fn prop_encoding_decodes_to_input(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
            let encoded = encode_bytes(&bytes);
            prop_assert_eq!(encoded.len() % 4, 0);
            prop_assert!(encoded.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/' || b == b'='));
            prop_assert_eq!(STANDARD.decode(&encoded).unwrap(), bytes);
        }
    }
}
