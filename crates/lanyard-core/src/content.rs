//! Badge content model and the newline-delimited record format.

use heapless::{String, Vec};

/// Capacity of one text field in bytes.
pub const FIELD_BYTES: usize = 64;
/// Capacity of the URL field in bytes.
pub const URL_BYTES: usize = 128;
/// Maximum number of name tokens rendered on their own lines.
pub const MAX_NAME_TOKENS: usize = 4;
/// Scratch size that comfortably holds one content record.
pub const CONTENT_SCRATCH_BYTES: usize = 512;

/// Record written to a blank store before the first read.
pub const DEFAULT_CONTENT: &str = "Auth0 by Okta
Peter Fernandez
Developer Advocate
https://a0.to/do
";

/// The five badge fields, immutable for one render pass.
///
/// Parsed positionally from newline-delimited text: header, names,
/// title, then either the URL (four-line records) or a detail line
/// followed by the URL (five-line records).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BadgeContent {
    pub header: String<FIELD_BYTES>,
    pub names: Vec<String<FIELD_BYTES>, MAX_NAME_TOKENS>,
    pub title: String<FIELD_BYTES>,
    pub detail: String<FIELD_BYTES>,
    pub url: String<URL_BYTES>,
}

impl BadgeContent {
    /// Parses a content record. Never fails: missing lines become
    /// empty fields and over-capacity fields are truncated at a char
    /// boundary.
    pub fn parse(text: &str) -> Self {
        let mut lines = text.lines();

        let header = lossy_field::<FIELD_BYTES>(lines.next().unwrap_or(""));

        let mut names = Vec::new();
        for token in lines.next().unwrap_or("").split_whitespace() {
            if names.push(lossy_field::<FIELD_BYTES>(token)).is_err() {
                break;
            }
        }

        let title = lossy_field::<FIELD_BYTES>(lines.next().unwrap_or(""));
        let fourth = lines.next().unwrap_or("");

        // Four-line records end with the URL; five-line records carry a
        // detail line before it.
        let (detail, url) = match lines.next() {
            Some(fifth) if !fifth.trim().is_empty() => (
                lossy_field::<FIELD_BYTES>(fourth),
                lossy_field::<URL_BYTES>(fifth),
            ),
            _ => (String::new(), lossy_field::<URL_BYTES>(fourth)),
        };

        Self {
            header,
            names,
            title,
            detail,
            url,
        }
    }
}

fn lossy_field<const N: usize>(line: &str) -> String<N> {
    let mut out = String::new();
    for ch in line.trim().chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

/// Abstract persistence backend for the content record.
pub trait ContentStore {
    type Error;

    /// Reads the record into `out`, returning its length, or `None`
    /// when no record has been written yet.
    fn read(&mut self, out: &mut [u8]) -> Result<Option<usize>, Self::Error>;

    /// Replaces the record.
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

/// Loads badge content, seeding a blank store with [`DEFAULT_CONTENT`]
/// first so the next boot reads the same record back.
pub fn load_or_seed<S>(store: &mut S, scratch: &mut [u8]) -> Result<BadgeContent, S::Error>
where
    S: ContentStore,
{
    let len = match store.read(scratch)? {
        Some(len) => len,
        None => {
            log::info!("content: no record found, seeding default");
            store.write(DEFAULT_CONTENT.as_bytes())?;
            store.read(scratch)?.unwrap_or(0)
        }
    };

    let text = core::str::from_utf8(&scratch[..len]).unwrap_or(DEFAULT_CONTENT);
    Ok(BadgeContent::parse(text))
}
