//! URL code generation on top of the heapless QR encoder.

use lanyard_core::qr::CodeMatrix;
use qrcodegen_no_heap::{DataTooLong, Mask, QrCode, QrCodeEcc, Version};

/// Largest code version the badge will render. Version 10 is 57
/// modules per side and holds far more than a short URL needs.
pub const MAX_VERSION: Version = Version::new(10);

const BUFFER_LEN: usize = MAX_VERSION.buffer_len();

/// Work and output buffers for one encode. Reusable across passes.
pub struct QrScratch {
    temp: [u8; BUFFER_LEN],
    out: [u8; BUFFER_LEN],
}

impl QrScratch {
    pub const fn new() -> Self {
        Self {
            temp: [0u8; BUFFER_LEN],
            out: [0u8; BUFFER_LEN],
        }
    }
}

impl Default for QrScratch {
    fn default() -> Self {
        Self::new()
    }
}

/// Why a URL could not be encoded.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EncodeError {
    /// The URL does not fit the supported code versions.
    TooLong,
}

impl From<DataTooLong> for EncodeError {
    fn from(_: DataTooLong) -> Self {
        Self::TooLong
    }
}

/// Generated code matrix borrowing its module storage from the
/// scratch buffers.
pub struct UrlCode<'a> {
    code: QrCode<'a>,
}

impl CodeMatrix for UrlCode<'_> {
    fn size(&self) -> u32 {
        self.code.size() as u32
    }

    fn module(&self, x: u32, y: u32) -> bool {
        self.code.get_module(x as i32, y as i32)
    }
}

/// Encodes `url` at medium error correction, smallest version first.
pub fn encode_url<'a>(url: &str, scratch: &'a mut QrScratch) -> Result<UrlCode<'a>, EncodeError> {
    let code = QrCode::encode_text(
        url,
        &mut scratch.temp,
        &mut scratch.out,
        QrCodeEcc::Medium,
        Version::MIN,
        MAX_VERSION,
        None::<Mask>,
        true,
    )?;

    Ok(UrlCode { code })
}
