//! Typed attribute values.
//!
//! Converts attribute text into a scalar known at compile time using the
//! type's [`FromStr`] implementation, then forwards it to a notifier.

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use crate::config::{ParsePolicy, TrailingText};
use crate::error::{AttributeError, Result};
use crate::handler::ProcessAttribute;

/// XML whitespace: space, tab, CR, LF.
#[inline]
fn is_xml_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Convert `text` to `T` under `policy`.
///
/// Under [`TrailingText::AcceptPrefix`] a leading numeric token is
/// converted and anything after it ignored, so `"42x"` yields `42`. The
/// token is only cut where its structure ends (after the integer part,
/// fraction or exponent), never inside a digit run: `"300"` as `u8` is
/// an error, not `30`. The error always carries the original, untrimmed
/// text.
pub fn parse_value<T>(text: &str, policy: &ParsePolicy) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let input = if policy.trim {
        text.trim_matches(is_xml_space)
    } else {
        text
    };

    match input.parse::<T>() {
        Ok(value) => Ok(value),
        Err(err) => {
            if policy.trailing == TrailingText::AcceptPrefix {
                if let Some(value) = parse_prefix(input) {
                    return Ok(value);
                }
            }
            Err(AttributeError::UnparseableValue {
                text: text.to_string(),
                target: type_name::<T>(),
                reason: err.to_string(),
            })
        }
    }
}

/// Convert the longest structural prefix of a leading numeric token.
///
/// The full input has already failed, so a boundary at the end of the
/// input is not retried.
fn parse_prefix<T: FromStr>(input: &str) -> Option<T> {
    numeric_boundaries(input.as_bytes())
        .into_iter()
        .rev()
        .filter(|&end| end < input.len())
        .find_map(|end| input[..end].parse().ok())
}

fn skip_digits(bytes: &[u8], mut pos: usize) -> usize {
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    pos
}

/// Ends of the leading `[sign] digits [. digits] [e [sign] digits]` token,
/// shortest first. Each entry is a place a stream extraction could stop.
fn numeric_boundaries(bytes: &[u8]) -> Vec<usize> {
    let mut ends = Vec::with_capacity(3);

    let mut pos = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_start = pos;
    pos = skip_digits(bytes, pos);
    let int_digits = pos - int_start;
    if int_digits > 0 {
        ends.push(pos);
    }

    if bytes.get(pos) == Some(&b'.') {
        let frac_start = pos + 1;
        let frac_end = skip_digits(bytes, frac_start);
        if int_digits + (frac_end - frac_start) == 0 {
            return ends;
        }
        pos = frac_end;
        ends.push(pos);
    }

    if ends.is_empty() {
        return ends;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp = pos + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = skip_digits(bytes, exp);
        if exp_end > exp {
            ends.push(exp_end);
        }
    }

    ends
}

/// Handler that converts attribute text to `T`.
///
/// On success the notifier receives the value. On failure nothing is
/// forwarded and an [`AttributeError::UnparseableValue`] naming the text
/// and target type is reported.
pub struct TypedHandler<T, F> {
    notifier: F,
    policy: ParsePolicy,
    _marker: PhantomData<fn() -> T>,
}

impl<T, F> TypedHandler<T, F>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: FnMut(T),
{
    pub fn new(notifier: F) -> Self {
        Self::with_policy(ParsePolicy::default(), notifier)
    }

    pub fn with_policy(policy: ParsePolicy, notifier: F) -> Self {
        Self {
            notifier,
            policy,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn policy(&self) -> &ParsePolicy {
        &self.policy
    }
}

impl<T, F> ProcessAttribute for TypedHandler<T, F>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: FnMut(T),
{
    fn process(&mut self, name: &str, value: &str) -> Result<()> {
        match parse_value::<T>(value, &self.policy) {
            Ok(parsed) => {
                (self.notifier)(parsed);
                Ok(())
            }
            Err(err) => {
                let target = type_name::<T>();
                tracing::warn!(attribute = name, value, target_type = target, "{err}");
                Err(err)
            }
        }
    }
}

impl<T, F> fmt::Debug for TypedHandler<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedHandler")
            .field("target", &type_name::<T>())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
