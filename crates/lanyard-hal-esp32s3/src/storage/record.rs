//! On-flash content record codec.
//!
//! One record per sector: fixed header, the newline-delimited badge
//! text, 0xFF padding, and a trailing checksum. A blank (erased)
//! sector reads as "no record yet".

/// "LNY1" little-endian.
pub const RECORD_MAGIC: u32 = 0x3159_4E4C;
const RECORD_VERSION: u8 = 1;

/// Header layout: magic (4), version (1), reserved (1), length (2).
pub const HEADER_LEN: usize = 8;
const CHECKSUM_LEN: usize = 4;
/// Largest content payload one record holds.
pub const MAX_CONTENT_BYTES: usize = 512;
/// Full record footprint; word-aligned for the flash ROM routines.
pub const RECORD_LEN: usize = HEADER_LEN + MAX_CONTENT_BYTES + CHECKSUM_LEN;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RecordError {
    /// Payload exceeds [`MAX_CONTENT_BYTES`].
    TooLarge,
    /// Magic matched but the record fails validation.
    Corrupted,
}

/// Serializes `content` into a full record image.
pub fn encode(content: &[u8], out: &mut [u8; RECORD_LEN]) -> Result<(), RecordError> {
    if content.len() > MAX_CONTENT_BYTES {
        return Err(RecordError::TooLarge);
    }

    out.fill(0xFF);
    out[0..4].copy_from_slice(&RECORD_MAGIC.to_le_bytes());
    out[4] = RECORD_VERSION;
    out[5] = 0x00;
    out[6..8].copy_from_slice(&(content.len() as u16).to_le_bytes());
    out[HEADER_LEN..HEADER_LEN + content.len()].copy_from_slice(content);

    let checksum = checksum32(&out[..HEADER_LEN + content.len()]);
    out[RECORD_LEN - CHECKSUM_LEN..].copy_from_slice(&checksum.to_le_bytes());
    Ok(())
}

/// Parses a record image.
///
/// Returns `Ok(None)` for a blank sector or foreign data (both are
/// treated as "not seeded yet") and `Err(Corrupted)` when the magic
/// matches but length or checksum do not hold up.
pub fn decode(buf: &[u8; RECORD_LEN]) -> Result<Option<&[u8]>, RecordError> {
    if buf.iter().all(|b| *b == 0xFF) {
        return Ok(None);
    }

    let magic = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    if magic != RECORD_MAGIC {
        return Ok(None);
    }

    if buf[4] != RECORD_VERSION {
        return Ok(None);
    }

    let len = u16::from_le_bytes([buf[6], buf[7]]) as usize;
    if len > MAX_CONTENT_BYTES {
        return Err(RecordError::Corrupted);
    }

    let expected = u32::from_le_bytes([
        buf[RECORD_LEN - 4],
        buf[RECORD_LEN - 3],
        buf[RECORD_LEN - 2],
        buf[RECORD_LEN - 1],
    ]);
    if checksum32(&buf[..HEADER_LEN + len]) != expected {
        return Err(RecordError::Corrupted);
    }

    Ok(Some(&buf[HEADER_LEN..HEADER_LEN + len]))
}

fn checksum32(bytes: &[u8]) -> u32 {
    let mut hash = 0x811C_9DC5u32;
    for b in bytes {
        hash ^= *b as u32;
        hash = hash.wrapping_mul(16_777_619);
    }
    hash
}
