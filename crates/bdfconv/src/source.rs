//! Turning raw input bytes into BDF text.
use crate::error::{BdfError, Result};
use log::warn;

const GZIP_MAGIC: &[u8; 2] = b"\x1F\x8B";
const ZIP_MAGIC: &[u8; 4] = b"PK\x03\x04";

/// Decodes BDF source text from `bytes`.
///
/// Plain files are expected to be UTF-8 (usually plain ASCII); anything else is
/// decoded lossily. A ZIP archive yields its first `.bdf` entry.
pub fn decode_source(bytes: &[u8]) -> Result<String> {
    if bytes.starts_with(GZIP_MAGIC) {
        return Err(BdfError::Archive(
            "gzip compressed .bdf not supported; decompress it or provide a zip archive".into(),
        ));
    }
    if bytes.starts_with(ZIP_MAGIC) {
        return from_zip(bytes);
    }
    Ok(decode_text(bytes))
}

fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(e) => {
            warn!("input is not valid UTF-8 ({e}), decoding lossily");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

#[cfg(feature = "zip")]
fn from_zip(bytes: &[u8]) -> Result<String> {
    use std::io::{Cursor, Read};

    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if file.name().to_ascii_lowercase().ends_with(".bdf") {
            log::debug!("reading {} from zip archive", file.name());
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)?;
            return Ok(decode_text(&buf));
        }
    }
    Err(BdfError::Archive("zip archive contained no .bdf".into()))
}

#[cfg(not(feature = "zip"))]
fn from_zip(_bytes: &[u8]) -> Result<String> {
    Err(BdfError::Archive("zip archives need the `zip` feature".into()))
}
