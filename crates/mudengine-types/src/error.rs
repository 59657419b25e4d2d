//! Error types for the record layer.

/// A value that would break a record invariant.
///
/// These only come from constructors and deserialization. Once a
/// [`Darkness`](crate::Darkness) or [`Keywords`](crate::Keywords) exists,
/// it is valid for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Darkness must stay within 0 (daylight) ..= 10 (absolute darkness).
    #[error("darkness {0} is out of range (0-10)")]
    DarknessOutOfRange(u8),

    /// An exit needs at least one keyword to be addressable.
    #[error("exit keyword list is empty")]
    NoKeywords,

    /// Keywords are matched verbatim, so a blank one could never be typed.
    #[error("exit keyword is blank")]
    BlankKeyword,
}
