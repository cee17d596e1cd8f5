//! Enumerated attribute values.
//!
//! A closed set of text tokens is registered up front, each mapped to a
//! caller-defined value. Processing only reads the table.

use std::fmt;

use crate::config::DuplicateToken;
use crate::error::{AttributeError, Result};
use crate::handler::ProcessAttribute;

/// Sorted token → value table.
#[derive(Debug, Clone)]
pub struct TokenTable<T> {
    entries: Vec<(Box<str>, T)>,
}

impl<T> TokenTable<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn search(&self, token: &str) -> std::result::Result<usize, usize> {
        self.entries
            .binary_search_by(|(key, _)| key.as_ref().cmp(token))
    }

    /// Register `token`.
    ///
    /// A token that is already present is either rejected, keeping the
    /// first value, or replaced, depending on `on_duplicate`.
    pub fn insert(&mut self, token: &str, value: T, on_duplicate: DuplicateToken) -> Result<()> {
        match self.search(token) {
            Ok(pos) => match on_duplicate {
                DuplicateToken::Reject => Err(AttributeError::DuplicateToken {
                    token: token.to_string(),
                }),
                DuplicateToken::Replace => {
                    self.entries[pos].1 = value;
                    Ok(())
                }
            },
            Err(pos) => {
                self.entries.insert(pos, (Box::from(token), value));
                Ok(())
            }
        }
    }

    #[inline]
    pub fn get(&self, token: &str) -> Option<&T> {
        self.search(token).ok().map(|pos| &self.entries[pos].1)
    }

    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.search(token).is_ok()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered tokens in sorted order.
    pub fn tokens(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.entries.iter().map(|(key, _)| key.as_ref())
    }
}

impl<T> Default for TokenTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Registration phase of an [`EnumHandler`].
///
/// Tokens can only be added here; [`EnumBuilder::build`] freezes the
/// table, so nothing can register a token once processing has started.
pub struct EnumBuilder<T, F> {
    table: TokenTable<T>,
    on_duplicate: DuplicateToken,
    notifier: F,
}

impl<T, F> EnumBuilder<T, F>
where
    T: Clone,
    F: FnMut(T),
{
    /// Builder that rejects duplicate registrations.
    pub fn new(notifier: F) -> Self {
        Self::with_policy(DuplicateToken::default(), notifier)
    }

    pub fn with_policy(on_duplicate: DuplicateToken, notifier: F) -> Self {
        Self {
            table: TokenTable::new(),
            on_duplicate,
            notifier,
        }
    }

    /// Register a token.
    pub fn add_item(&mut self, token: &str, value: T) -> Result<()> {
        self.table
            .insert(token, value, self.on_duplicate)
            .inspect_err(|err| tracing::warn!(token, "{err}"))
    }

    /// Chaining form of [`EnumBuilder::add_item`].
    pub fn item(mut self, token: &str, value: T) -> Result<Self> {
        self.add_item(token, value)?;
        Ok(self)
    }

    #[inline]
    pub fn table(&self) -> &TokenTable<T> {
        &self.table
    }

    /// Freeze the table.
    pub fn build(self) -> EnumHandler<T, F> {
        EnumHandler {
            table: self.table,
            notifier: self.notifier,
        }
    }
}

/// Handler that maps known tokens to enumerated values.
///
/// ```
/// use saxattr_core::token::EnumHandler;
/// use saxattr_core::ProcessAttribute;
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Shape { Round, Square }
///
/// let mut shapes = Vec::new();
/// let mut handler = EnumHandler::builder(|s: Shape| shapes.push(s))
///     .item("round", Shape::Round).unwrap()
///     .item("square", Shape::Square).unwrap()
///     .build();
///
/// handler.process("shape", "square").unwrap();
/// assert!(handler.process("shape", "oval").is_err());
/// drop(handler);
/// assert_eq!(shapes, vec![Shape::Square]);
/// ```
pub struct EnumHandler<T, F> {
    table: TokenTable<T>,
    notifier: F,
}

impl<T, F> EnumHandler<T, F>
where
    T: Clone,
    F: FnMut(T),
{
    /// Start registering tokens, rejecting duplicates.
    pub fn builder(notifier: F) -> EnumBuilder<T, F> {
        EnumBuilder::new(notifier)
    }

    /// Read-only view of the frozen table.
    #[inline]
    pub fn table(&self) -> &TokenTable<T> {
        &self.table
    }
}

impl<T, F> From<EnumBuilder<T, F>> for EnumHandler<T, F>
where
    T: Clone,
    F: FnMut(T),
{
    fn from(builder: EnumBuilder<T, F>) -> Self {
        builder.build()
    }
}

impl<T, F> ProcessAttribute for EnumHandler<T, F>
where
    T: Clone,
    F: FnMut(T),
{
    fn process(&mut self, name: &str, value: &str) -> Result<()> {
        match self.table.get(value) {
            Some(mapped) => {
                (self.notifier)(mapped.clone());
                Ok(())
            }
            None => {
                tracing::warn!(attribute = name, token = value, "unknown enum member");
                Err(AttributeError::UnknownToken {
                    token: value.to_string(),
                })
            }
        }
    }
}

impl<T: fmt::Debug, F> fmt::Debug for EnumHandler<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumHandler")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Color {
        Red,
        Blue,
    }

    #[test]
    fn test_lookup_hit_and_miss() {
        let mut got = Vec::new();
        let mut builder = EnumHandler::builder(|c: Color| got.push(c));
        builder.add_item("RED", Color::Red).unwrap();
        builder.add_item("BLUE", Color::Blue).unwrap();
        let mut handler = builder.build();

        handler.process("color", "RED").unwrap();
        let err = handler.process("color", "GREEN").unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnknownToken);
        assert!(err.to_string().contains("GREEN"));
        handler.process("color", "BLUE").unwrap();
        drop(handler);

        assert_eq!(got, vec![Color::Red, Color::Blue]);
    }

    #[test]
    fn test_duplicate_rejected_keeps_first() {
        let mut got = None;
        let mut builder = EnumBuilder::new(|c: Color| got = Some(c));
        builder.add_item("RED", Color::Red).unwrap();
        let err = builder.add_item("RED", Color::Blue).unwrap_err();
        assert_eq!(err, AttributeError::DuplicateToken { token: "RED".into() });
        assert_eq!(builder.table().len(), 1);

        let mut handler = builder.build();
        handler.process("color", "RED").unwrap();
        drop(handler);
        assert_eq!(got, Some(Color::Red));
    }

    #[test]
    fn test_duplicate_replace_last_wins() {
        let mut got = None;
        let mut builder = EnumBuilder::with_policy(DuplicateToken::Replace, |c: Color| got = Some(c));
        builder.add_item("RED", Color::Red).unwrap();
        builder.add_item("RED", Color::Blue).unwrap();
        assert_eq!(builder.table().len(), 1);

        let mut handler: EnumHandler<_, _> = builder.into();
        handler.process("color", "RED").unwrap();
        drop(handler);
        assert_eq!(got, Some(Color::Blue));
    }

    #[test]
    fn test_frozen_table_unchanged_by_processing() {
        let mut handler = EnumHandler::builder(|_: Color| {})
            .item("RED", Color::Red)
            .unwrap()
            .build();
        for token in ["RED", "BLUE", "RED", ""] {
            let _ = handler.process("color", token);
        }
        let tokens: Vec<_> = handler.table().tokens().collect();
        assert_eq!(tokens, vec!["RED"]);
    }

    #[test]
    fn test_tokens_are_case_sensitive() {
        let handler = EnumHandler::builder(|_: Color| {})
            .item("red", Color::Red)
            .unwrap()
            .build();
        assert!(handler.table().contains("red"));
        assert!(!handler.table().contains("RED"));
    }

    #[test]
    fn test_table_sorted() {
        let mut table = TokenTable::new();
        for (i, token) in ["miter", "bevel", "round"].into_iter().enumerate() {
            table.insert(token, i, DuplicateToken::Reject).unwrap();
        }
        let tokens: Vec<_> = table.tokens().collect();
        assert_eq!(tokens, vec!["bevel", "miter", "round"]);
        assert_eq!(table.get("round"), Some(&2));
        assert_eq!(table.get("square"), None);
    }
}
