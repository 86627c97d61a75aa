//! Localizer port — string table lookup owned by the host.

/// Resolves a resource key to a user-facing string.
pub trait Localizer: Send + Sync {
    /// Look up `key`. Implementations return something displayable even for
    /// unknown keys.
    fn lookup(&self, key: &str) -> String;
}
