//! Tableau workbook reader: file decoding and element tree

use encoding_rs::Encoding;
use std::fs;
use std::path::Path;

pub mod document;
pub mod node;

pub use document::Document;
pub use node::XmlNode;

use crate::error::ExtractError;

/// Look up an encoding by its WHATWG label (e.g. "utf-8", "windows-1252")
pub fn resolve_encoding(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}

/// Read a workbook file as text.
///
/// A byte order mark takes precedence over `encoding` and is removed.
/// Decoding is strict: malformed sequences fail instead of being replaced.
pub fn load_document<P: AsRef<Path>>(
    path: P,
    encoding: &'static Encoding,
) -> Result<String, ExtractError> {
    let path_ref = path.as_ref();
    let bytes = fs::read(path_ref).map_err(|source| ExtractError::Io {
        path: path_ref.to_path_buf(),
        source,
    })?;

    let (encoding, body) = match Encoding::for_bom(&bytes) {
        Some((bom_encoding, bom_len)) => (bom_encoding, &bytes[bom_len..]),
        None => (encoding, &bytes[..]),
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(|text| text.into_owned())
        .ok_or_else(|| ExtractError::Decode {
            path: path_ref.to_path_buf(),
            encoding: encoding.name(),
        })
}

/// Read and parse a workbook file
pub fn read_document<P: AsRef<Path>>(
    path: P,
    encoding: &'static Encoding,
) -> Result<Document, ExtractError> {
    let text = load_document(path, encoding)?;
    Document::parse(&text)
}
