use crate::errors::*;
use error_stack::{IntoReport, Result, ResultExt};
use sha2::{Digest, Sha256};
use url::Url;

/// Raw (hex) encoding of a UTF-8 string, as the full node expects for
/// names, descriptions, urls and token ids.
pub fn from_utf8(text: &str) -> String {
    hex::encode(text.as_bytes())
}

/// Decodes a raw (hex) string back to UTF-8.
pub fn to_utf8(raw: &str) -> Result<String, EncodingErrorKind> {
    let raw = raw.strip_prefix("0x").unwrap_or(raw);
    let bytes = hex::decode(raw)
        .into_report()
        .attach_printable_lazy(|| format!("not a hex string: {}", raw))
        .change_context(EncodingErrorKind::Payload)?;

    String::from_utf8(bytes)
        .into_report()
        .change_context(EncodingErrorKind::Payload)
}

pub fn is_hex(value: &str) -> bool {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Accepts absolute http(s) urls with a host.
pub fn is_valid_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}

pub fn hash(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

pub fn double_hash(data: &[u8]) -> [u8; 32] {
    hash(&hash(data))
}

/// Milliseconds since the unix epoch.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub(crate) fn strip_hex_prefix(value: &str) -> &str {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
}
