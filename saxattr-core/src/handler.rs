//! Attribute handler contract and the closed set of handler variants.
//!
//! A parsing engine calls [`ProcessAttribute::process`] once per
//! attribute, in document order, before moving on to the element's
//! children. The value text is only borrowed for the call; handlers that
//! keep it make their own copy.
//!
//! Failures are returned as [`AttributeError`] and reported through
//! `tracing`. They never abort the parse: the caller logs or counts them
//! and continues with the next attribute.

use crate::config::{DuplicateToken, ParsePolicy};
use crate::error::{AttributeError, Result};
use crate::intern::{InternHandler, InternId};
use crate::token::{EnumBuilder, EnumHandler};
use crate::typed::TypedHandler;

/// Something that consumes one attribute name/value pair.
pub trait ProcessAttribute {
    fn process(&mut self, name: &str, value: &str) -> Result<()>;

    /// Process raw UTF-8 bytes as emitted by byte-oriented engines.
    ///
    /// The name is decoded lossily since it only appears in diagnostics.
    /// A value that is not UTF-8 is reported and not processed.
    fn process_bytes(&mut self, name: &[u8], value: &[u8]) -> Result<()> {
        let name = String::from_utf8_lossy(name);
        match std::str::from_utf8(value) {
            Ok(value) => self.process(&name, value),
            Err(err) => {
                tracing::warn!(attribute = %name, "{err}");
                Err(AttributeError::InvalidUtf8 {
                    name: name.into_owned(),
                })
            }
        }
    }
}

impl<P: ProcessAttribute + ?Sized> ProcessAttribute for &mut P {
    #[inline]
    fn process(&mut self, name: &str, value: &str) -> Result<()> {
        (**self).process(name, value)
    }
}

impl<P: ProcessAttribute + ?Sized> ProcessAttribute for Box<P> {
    #[inline]
    fn process(&mut self, name: &str, value: &str) -> Result<()> {
        (**self).process(name, value)
    }
}

/// Silently ignores every attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IgnoreHandler;

impl ProcessAttribute for IgnoreHandler {
    #[inline]
    fn process(&mut self, _name: &str, _value: &str) -> Result<()> {
        Ok(())
    }
}

/// Reports an attribute nobody asked for.
///
/// Stateless, so one instance can back any number of dispatch entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnknownHandler;

impl ProcessAttribute for UnknownHandler {
    fn process(&mut self, name: &str, _value: &str) -> Result<()> {
        tracing::info!(attribute = name, "unknown attribute");
        Err(AttributeError::UnknownAttribute {
            name: name.to_string(),
        })
    }
}

/// A [`TypedHandler`] with its value type erased.
///
/// Only constructible from a `TypedHandler`, so the `Typed` variant can
/// hold nothing else:
///
/// ```compile_fail
/// use saxattr_core::handler::{AttributeHandler, ErasedTyped, UnknownHandler};
///
/// let _ = AttributeHandler::Typed(ErasedTyped(Box::new(UnknownHandler)));
/// ```
pub struct ErasedTyped<'h>(Box<dyn ProcessAttribute + 'h>);

/// An [`EnumHandler`] with its value type erased.
pub struct ErasedEnum<'h>(Box<dyn ProcessAttribute + 'h>);

impl<'h, T, F> From<TypedHandler<T, F>> for ErasedTyped<'h>
where
    T: std::str::FromStr + 'h,
    T::Err: std::fmt::Display,
    F: FnMut(T) + 'h,
{
    fn from(h: TypedHandler<T, F>) -> Self {
        ErasedTyped(Box::new(h))
    }
}

impl<'h, T, F> From<EnumHandler<T, F>> for ErasedEnum<'h>
where
    T: Clone + 'h,
    F: FnMut(T) + 'h,
{
    fn from(h: EnumHandler<T, F>) -> Self {
        ErasedEnum(Box::new(h))
    }
}

impl ProcessAttribute for ErasedTyped<'_> {
    #[inline]
    fn process(&mut self, name: &str, value: &str) -> Result<()> {
        self.0.process(name, value)
    }
}

impl ProcessAttribute for ErasedEnum<'_> {
    #[inline]
    fn process(&mut self, name: &str, value: &str) -> Result<()> {
        self.0.process(name, value)
    }
}

/// Any attribute handler.
///
/// Typed and enumerated handlers are generic over their value type, so
/// those variants hold them type-erased.
pub enum AttributeHandler<'h> {
    Ignore(IgnoreHandler),
    Unknown(UnknownHandler),
    Interning(InternHandler<'h>),
    Typed(ErasedTyped<'h>),
    Enum(ErasedEnum<'h>),
}

impl<'h> AttributeHandler<'h> {
    pub fn ignore() -> Self {
        AttributeHandler::Ignore(IgnoreHandler)
    }

    pub fn unknown() -> Self {
        AttributeHandler::Unknown(UnknownHandler)
    }

    pub fn interning<N, V>(new_value: N, value: V) -> Self
    where
        N: FnMut(&str, InternId) + 'h,
        V: FnMut(InternId) + 'h,
    {
        AttributeHandler::Interning(InternHandler::new(new_value, value))
    }

    /// Typed handler with the default (strict) policy.
    pub fn typed<T, F>(notifier: F) -> Self
    where
        T: std::str::FromStr + 'h,
        T::Err: std::fmt::Display,
        F: FnMut(T) + 'h,
    {
        Self::typed_with_policy(ParsePolicy::default(), notifier)
    }

    pub fn typed_with_policy<T, F>(policy: ParsePolicy, notifier: F) -> Self
    where
        T: std::str::FromStr + 'h,
        T::Err: std::fmt::Display,
        F: FnMut(T) + 'h,
    {
        AttributeHandler::Typed(TypedHandler::<T, F>::with_policy(policy, notifier).into())
    }

    /// Enum handler over `items`, rejecting duplicate tokens.
    pub fn tokens<'t, T, F, I>(items: I, notifier: F) -> Result<Self>
    where
        T: Clone + 'h,
        F: FnMut(T) + 'h,
        I: IntoIterator<Item = (&'t str, T)>,
    {
        let mut builder = EnumBuilder::with_policy(DuplicateToken::Reject, notifier);
        for (token, value) in items {
            builder.add_item(token, value)?;
        }
        Ok(builder.build().into())
    }

    /// Short variant name, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AttributeHandler::Ignore(_) => "ignore",
            AttributeHandler::Unknown(_) => "unknown",
            AttributeHandler::Interning(_) => "interning",
            AttributeHandler::Typed(_) => "typed",
            AttributeHandler::Enum(_) => "enum",
        }
    }
}

impl ProcessAttribute for AttributeHandler<'_> {
    fn process(&mut self, name: &str, value: &str) -> Result<()> {
        match self {
            AttributeHandler::Ignore(h) => h.process(name, value),
            AttributeHandler::Unknown(h) => h.process(name, value),
            AttributeHandler::Interning(h) => h.process(name, value),
            AttributeHandler::Typed(h) => h.process(name, value),
            AttributeHandler::Enum(h) => h.process(name, value),
        }
    }
}

impl std::fmt::Debug for AttributeHandler<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeHandler::Interning(h) => f.debug_tuple("Interning").field(h).finish(),
            other => write!(f, "AttributeHandler::{}", other.kind()),
        }
    }
}

impl From<IgnoreHandler> for AttributeHandler<'_> {
    fn from(h: IgnoreHandler) -> Self {
        AttributeHandler::Ignore(h)
    }
}

impl From<UnknownHandler> for AttributeHandler<'_> {
    fn from(h: UnknownHandler) -> Self {
        AttributeHandler::Unknown(h)
    }
}

impl<'h> From<InternHandler<'h>> for AttributeHandler<'h> {
    fn from(h: InternHandler<'h>) -> Self {
        AttributeHandler::Interning(h)
    }
}

impl<'h, T, F> From<TypedHandler<T, F>> for AttributeHandler<'h>
where
    T: std::str::FromStr + 'h,
    T::Err: std::fmt::Display,
    F: FnMut(T) + 'h,
{
    fn from(h: TypedHandler<T, F>) -> Self {
        AttributeHandler::Typed(h.into())
    }
}

impl<'h, T, F> From<EnumHandler<T, F>> for AttributeHandler<'h>
where
    T: Clone + 'h,
    F: FnMut(T) + 'h,
{
    fn from(h: EnumHandler<T, F>) -> Self {
        AttributeHandler::Enum(h.into())
    }
}
