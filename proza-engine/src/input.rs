//! Input abstraction for document processing
//!
//! Provides a unified interface for reading markup, plain text or
//! annotations from various sources. Gzip-compressed files and byte
//! buffers are decompressed transparently.

use crate::error::{EngineError, Result};
use flate2::read::MultiGzDecoder;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Extensions stripped (once, after `.gz`) when deriving a document id
const KNOWN_EXTENSIONS: [&str; 6] = ["xml", "html", "htm", "txt", "conllu", "tei"];

/// Unified input abstraction
pub enum Input {
    /// Direct text string
    Text(String),
    /// File path to read from
    File(PathBuf),
    /// Raw bytes, possibly gzip-compressed
    Bytes(Vec<u8>),
    /// Reader stream (for stdin, network, etc.)
    Reader(Box<dyn Read + Send>),
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::Text(text) => f
                .debug_tuple("Text")
                .field(&format!("<{} bytes>", text.len()))
                .finish(),
            Input::File(path) => f.debug_tuple("File").field(path).finish(),
            Input::Bytes(bytes) => f
                .debug_tuple("Bytes")
                .field(&format!("<{} bytes>", bytes.len()))
                .finish(),
            Input::Reader(_) => f.debug_tuple("Reader").field(&"<Reader>").finish(),
        }
    }
}

impl Input {
    /// Create input from a text string
    pub fn from_text<S: Into<String>>(text: S) -> Self {
        Input::Text(text.into())
    }

    /// Create input from a file path
    pub fn from_file<P: Into<PathBuf>>(path: P) -> Self {
        Input::File(path.into())
    }

    /// Create input from bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }

    /// Create input from a reader
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        Input::Reader(Box::new(reader))
    }

    /// Source path, for file inputs
    pub fn path(&self) -> Option<&Path> {
        match self {
            Input::File(path) => Some(path),
            _ => None,
        }
    }

    /// Document id derived from the file name, for file inputs
    pub fn document_id(&self) -> Option<String> {
        self.path().and_then(document_id_from_path)
    }

    /// Read the raw bytes, decompressing gzip content
    pub fn read_bytes(self) -> Result<Vec<u8>> {
        let raw = match self {
            Input::Text(text) => return Ok(text.into_bytes()),
            Input::Bytes(bytes) => bytes,
            Input::File(path) => fs::read(&path)
                .map_err(|e| EngineError::Io(format!("Failed to read file {path:?}: {e}")))?,
            Input::Reader(mut reader) => {
                let mut buffer = Vec::new();
                reader
                    .read_to_end(&mut buffer)
                    .map_err(|e| EngineError::Io(format!("Failed to read from stream: {e}")))?;
                buffer
            }
        };

        if raw.starts_with(&GZIP_MAGIC) {
            gunzip(&raw)
        } else {
            Ok(raw)
        }
    }

    /// Read the input as UTF-8 text
    pub fn read_text(self) -> Result<String> {
        if let Input::Text(text) = self {
            return Ok(text);
        }
        let bytes = self.read_bytes()?;
        String::from_utf8(bytes).map_err(|e| EngineError::Encoding(format!("Invalid UTF-8: {e}")))
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Input::Text(text)
    }
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Input::Text(text.to_string())
    }
}

impl From<PathBuf> for Input {
    fn from(path: PathBuf) -> Self {
        Input::File(path)
    }
}

impl From<Vec<u8>> for Input {
    fn from(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }
}

fn gunzip(raw: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = MultiGzDecoder::new(raw);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| EngineError::Encoding(format!("Invalid gzip stream: {e}")))?;
    Ok(out)
}

/// Document id for `path`: the file name without `.gz` and one known
/// extension, e.g. `_zev001gesc01_01.xml.gz` becomes `_zev001gesc01_01`
pub fn document_id_from_path(path: &Path) -> Option<String> {
    let mut name = path.file_name()?.to_str()?;
    if let Some(stripped) = name.strip_suffix(".gz") {
        name = stripped;
    }
    if let Some((stem, ext)) = name.rsplit_once('.') {
        if !stem.is_empty() && KNOWN_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) {
            name = stem;
        }
    }
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
