//! Loading chart text from disk

use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use std::fs;
use std::io::Read;
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const UTF8_BOM: &str = "\u{feff}";

/// Read a chart file, decompressing it if it is gzipped
pub fn read_chart_file(path: &Path) -> Result<String> {
    let data = fs::read(path)?;
    log::debug!("Read {} bytes from {}", data.len(), path.display());
    decode_chart_bytes(data)
}

/// Turn raw file bytes into chart text
///
/// Gzip data is detected by its magic number, not the file name.
pub fn decode_chart_bytes(data: Vec<u8>) -> Result<String> {
    let data = if data.starts_with(&GZIP_MAGIC) {
        let mut decoder = GzDecoder::new(data.as_slice());
        let mut decompressed = Vec::new();
        decoder.read_to_end(&mut decompressed)?;
        decompressed
    } else {
        data
    };

    let text = String::from_utf8(data).map_err(|_| Error::InvalidUtf8)?;
    match text.strip_prefix(UTF8_BOM) {
        Some(stripped) => Ok(stripped.to_string()),
        None => Ok(text),
    }
}
