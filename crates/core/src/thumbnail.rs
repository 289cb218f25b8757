use std::fs::File;
use std::io::{self, BufReader, Read, Seek};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::ThumbnailMetadata;

pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Text chunk key holding the source URI of a cached thumbnail.
pub const URI_KEY: &str = "Thumb::URI";

/// Reads the first eight bytes and compares them with the PNG signature.
/// A file shorter than the signature is simply not a PNG.
pub fn has_png_signature<R: Read>(reader: &mut R) -> io::Result<bool> {
    let mut header = [0u8; 8];
    match reader.read_exact(&mut header) {
        Ok(()) => Ok(header == PNG_SIGNATURE),
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(err) => Err(err),
    }
}

/// An open file that passed the signature check. Dropping it closes the
/// handle.
pub struct ThumbnailFile {
    path: PathBuf,
    reader: BufReader<File>,
}

impl ThumbnailFile {
    pub fn open(path: &Path) -> Result<Self> {
        let mut reader = BufReader::new(File::open(path)?);
        if !has_png_signature(&mut reader)? {
            return Err(Error::NotPng(path.to_path_buf()));
        }
        Ok(Self {
            path: path.to_path_buf(),
            reader,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses the chunks ahead of the image data and returns the
    /// `Thumb::URI` value, if any. Pixel data is never decoded.
    pub fn read_metadata(mut self) -> Result<Option<ThumbnailMetadata>> {
        let path = self.path;
        let metadata_err = |source: png::DecodingError| Error::Metadata {
            path: path.clone(),
            source,
        };

        self.reader
            .rewind()
            .map_err(|e| metadata_err(png::DecodingError::IoError(e)))?;
        let reader = png::Decoder::new(self.reader)
            .read_info()
            .map_err(metadata_err)?;

        let uri = find_uri(reader.info()).map_err(metadata_err)?;
        Ok(uri.map(|original_uri| ThumbnailMetadata { original_uri }))
    }
}

/// tEXt and zTXt values come back as Latin-1 strings with one char per
/// stored byte; they are mapped back to those bytes. iTXt is UTF-8 already.
fn find_uri(info: &png::Info<'_>) -> std::result::Result<Option<Vec<u8>>, png::DecodingError> {
    if let Some(chunk) = info
        .uncompressed_latin1_text
        .iter()
        .find(|c| c.keyword == URI_KEY)
    {
        return Ok(Some(latin1_bytes(&chunk.text)));
    }
    if let Some(chunk) = info
        .compressed_latin1_text
        .iter()
        .find(|c| c.keyword == URI_KEY)
    {
        return chunk.get_text().map(|text| Some(latin1_bytes(&text)));
    }
    if let Some(chunk) = info.utf8_text.iter().find(|c| c.keyword == URI_KEY) {
        return chunk.get_text().map(|text| Some(text.into_bytes()));
    }
    Ok(None)
}

fn latin1_bytes(text: &str) -> Vec<u8> {
    text.chars().map(|c| c as u8).collect()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn signature_matches_png_header() {
        let mut ok = Cursor::new(PNG_SIGNATURE.to_vec());
        assert!(has_png_signature(&mut ok).unwrap());

        let mut jpeg = Cursor::new(vec![0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10, b'J', b'F']);
        assert!(!has_png_signature(&mut jpeg).unwrap());
    }

    #[test]
    fn short_read_is_not_png() {
        let mut short = Cursor::new(PNG_SIGNATURE[..5].to_vec());
        assert!(!has_png_signature(&mut short).unwrap());
        let mut empty = Cursor::new(Vec::new());
        assert!(!has_png_signature(&mut empty).unwrap());
    }

    #[test]
    fn latin1_text_maps_back_to_stored_bytes() {
        let stored: String = "caf\u{c3}\u{a9}".to_string();
        assert_eq!(latin1_bytes(&stored), "café".as_bytes());
        assert_eq!(latin1_bytes("file:///x"), b"file:///x");
    }
}
