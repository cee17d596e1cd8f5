//! Handler policies.
//!
//! Policies are plain values passed at construction. With the `serde`
//! feature they can be loaded from whatever configuration format the
//! host application already uses.

/// What a typed conversion does with text left over after a valid value.
///
/// `"42x"` parses as `42` under [`TrailingText::AcceptPrefix`] and fails
/// under [`TrailingText::Reject`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TrailingText {
    /// The whole text must convert.
    #[default]
    Reject,
    /// The longest convertible prefix wins; the rest is ignored.
    AcceptPrefix,
}

/// What a token table does when the same token is registered twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DuplicateToken {
    /// Keep the first value and report the conflict.
    #[default]
    Reject,
    /// Last registration wins.
    Replace,
}

/// Conversion policy for [`TypedHandler`](crate::typed::TypedHandler).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParsePolicy {
    pub trailing: TrailingText,
    /// Strip XML whitespace (space, tab, CR, LF) from both ends first.
    pub trim: bool,
}

impl ParsePolicy {
    /// Whole-text conversion after trimming.
    pub const STRICT: ParsePolicy = ParsePolicy {
        trailing: TrailingText::Reject,
        trim: true,
    };

    /// Prefix conversion after trimming, like stream extraction.
    pub const LENIENT: ParsePolicy = ParsePolicy {
        trailing: TrailingText::AcceptPrefix,
        trim: true,
    };
}

impl Default for ParsePolicy {
    fn default() -> Self {
        Self::STRICT
    }
}
