//! Input opening with transparent gzip support
//!
//! Raw corpus dumps are frequently shipped compressed, so every reader in
//! this crate goes through [`open_text`], which picks a decoder based on
//! the file extension.

use crate::Result;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// An opened input stream together with its on-disk size when known
pub struct TextSource {
    pub reader: Box<dyn Read>,
    /// Size of the file in bytes, `None` for compressed inputs where the
    /// decoded length is unknown up front
    pub total_bytes: Option<u64>,
}

/// Open a text file for reading, decompressing `.gz` files on the fly
pub fn open_text<P: AsRef<Path>>(path: P) -> Result<TextSource> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let file_len = file.metadata()?.len();

    match path.extension().and_then(|e| e.to_str()) {
        Some("gz") => {
            debug!("Opening gzip-compressed input: {:?}", path);
            Ok(TextSource {
                reader: Box::new(GzDecoder::new(file)),
                total_bytes: None,
            })
        }
        _ => {
            debug!("Opening plain input: {:?}", path);
            Ok(TextSource {
                reader: Box::new(file),
                total_bytes: Some(file_len),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    #[test]
    fn test_open_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.txt");
        std::fs::write(&path, "merhaba\n").unwrap();

        let mut source = open_text(&path).unwrap();
        assert_eq!(source.total_bytes, Some(8));

        let mut content = String::new();
        source.reader.read_to_string(&mut content).unwrap();
        assert_eq!(content, "merhaba\n");
    }

    #[test]
    fn test_open_gzip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dump.txt.gz");
        {
            let file = File::create(&path).unwrap();
            let mut encoder = GzEncoder::new(file, Compression::default());
            write!(encoder, "1\tkitap\t9\n").unwrap();
            encoder.finish().unwrap();
        }

        let mut source = open_text(&path).unwrap();
        assert!(source.total_bytes.is_none());

        let mut content = String::new();
        source.reader.read_to_string(&mut content).unwrap();
        assert_eq!(content, "1\tkitap\t9\n");
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = open_text(dir.path().join("missing.txt"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
