// src/checker/decode.rs
// =============================================================================
// Decodes a captured response body according to its content-encoding.
//
// The HTTP client hands us the bytes exactly as they came over the wire, so
// a body the server gzipped is still gzipped here. Codings are listed in the
// order they were applied ("gzip, br" means gzip first), so they are undone
// from last to first.
//
// Supported: identity, gzip (x-gzip), deflate (zlib-wrapped or raw), br.
// =============================================================================

use flate2::read::{DeflateDecoder, GzDecoder, ZlibDecoder};
use std::io::{self, Read};

const BROTLI_BUFFER_SIZE: usize = 4096;

/// Undoes every coding in `content_encoding`, last applied first
pub fn decode_body(content_encoding: Option<&str>, raw: &[u8]) -> io::Result<Vec<u8>> {
    let mut data = raw.to_vec();
    let Some(header) = content_encoding else {
        return Ok(data);
    };

    let codings: Vec<String> = header
        .split(',')
        .map(|coding| coding.trim().to_ascii_lowercase())
        .filter(|coding| !coding.is_empty())
        .collect();

    for coding in codings.iter().rev() {
        data = match coding.as_str() {
            "identity" => data,
            "gzip" | "x-gzip" => read_all(GzDecoder::new(data.as_slice()))?,
            "deflate" => inflate(&data)?,
            "br" => read_all(brotli::Decompressor::new(data.as_slice(), BROTLI_BUFFER_SIZE))?,
            other => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("unsupported content-encoding '{}'", other),
                ))
            }
        };
    }

    Ok(data)
}

// "deflate" is supposed to be zlib-wrapped, but plenty of servers send raw deflate
fn inflate(data: &[u8]) -> io::Result<Vec<u8>> {
    read_all(ZlibDecoder::new(data)).or_else(|_| read_all(DeflateDecoder::new(data)))
}

fn read_all<R: Read>(mut reader: R) -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    reader.read_to_end(&mut out)?;
    Ok(out)
}
