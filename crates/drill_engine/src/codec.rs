//! Share tokens.
//!
//! A token is the URL-safe base64 (no padding) of the decimal rendering
//! of the problem parameter. Decoding is total: any malformed token is
//! `None`, never a panic, and no range check is applied so a token holds
//! exactly the information the parameter does.

use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use tracing::debug;

/// Opaque, copy-pasteable handle for one specific problem.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShareToken(String);

impl ShareToken {
    /// Encode a problem parameter.
    pub fn encode(a: i64) -> Self {
        ShareToken(URL_SAFE_NO_PAD.encode(a.to_string()))
    }

    /// Decode a token back into the parameter. Bad alphabet, bad UTF-8
    /// and non-integer payloads all come back as `None`.
    pub fn decode(token: &str) -> Option<i64> {
        let bytes = URL_SAFE_NO_PAD.decode(token.trim()).ok()?;
        let text = std::str::from_utf8(&bytes).ok()?;
        let a = text.trim().parse().ok()?;
        debug!(target: "drill::codec", a, "decoded share token");
        Some(a)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShareToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
