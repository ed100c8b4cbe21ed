use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::UploadError;

/// Maximum number of bytes per transmitted chunk. Content Hub caps
/// individual chunk posts at this size.
pub const CHUNK_SIZE_BYTES: usize = 1_000_000;

/// One bounded slice of the decoded payload, tagged with its 0-based index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub index: usize,
    pub bytes: Vec<u8>,
}

/// Decodes a base64 payload and partitions it into chunks of at most
/// `chunk_size` bytes, in order. The final chunk may be shorter.
pub fn split(content_base64: &str, chunk_size: usize) -> Result<Vec<Chunk>, UploadError> {
    let payload = STANDARD.decode(content_base64)?;

    Ok(payload
        .chunks(chunk_size)
        .enumerate()
        .map(|(index, bytes)| Chunk {
            index,
            bytes: bytes.to_vec(),
        })
        .collect())
}
