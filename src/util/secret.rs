//! Secret wrapper for the anon key.
//!
//! Prevents the credential from leaking through debug output, logs, or
//! error messages.

use serde::Deserialize;
use std::fmt;

/// An opaque bearer token, redacted everywhere except [`AnonKey::expose_secret`].
///
/// The key's internal structure (the observed instances are compact signed
/// tokens) is never interpreted here, only its shape is validated by the
/// loader.
///
/// - `Debug` and `Display` print `[REDACTED]`
/// - No `Serialize` impl, so the key cannot ride along into any output stream
/// - Memory is cleared on drop (best-effort, not cryptographically secure)
///
/// # Example
/// ```
/// use supaconf::AnonKey;
///
/// let key = AnonKey::new("abc.def.ghi");
/// assert_eq!(format!("{:?}", key), "[REDACTED]");
/// assert_eq!(key.expose_secret(), "abc.def.ghi");
/// ```
#[derive(Clone)]
pub struct AnonKey(String);

impl AnonKey {
    /// Wrap a key value.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Explicitly expose the key.
    ///
    /// Only call this where the raw value is actually needed, such as when
    /// building the client's `apikey` header.
    #[inline]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AnonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for AnonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl PartialEq for AnonKey {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for AnonKey {}

impl Drop for AnonKey {
    fn drop(&mut self) {
        // Best-effort clearing; the compiler may elide this and copies may
        // exist elsewhere. Use the zeroize crate if stronger guarantees are
        // ever needed.
        self.0.clear();
        self.0.shrink_to_fit();
    }
}

impl<'de> Deserialize<'de> for AnonKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(AnonKey::new)
    }
}
