//! SAX Attribute Handlers
//!
//! Interprets attribute values for streaming, event-based document
//! parsers. The engine isolates each attribute of a start-element event
//! and hands its name and value to a handler, which converts, interns,
//! resolves or ignores it and notifies its owner through callbacks.
//!
//! # Architecture
//!
//! - **handler.rs** - `ProcessAttribute` contract, `AttributeHandler` sum type, ignore/unknown
//! - **intern.rs** - Value interning into dense ids (`InternTable`, `InternHandler`)
//! - **typed.rs** - `FromStr` conversion to a scalar type (`TypedHandler`)
//! - **token.rs** - Closed token → value mapping (`TokenTable`, `EnumBuilder`, `EnumHandler`)
//! - **config.rs** - Conversion and registration policies
//! - **error.rs** - `AttributeError`, `ErrorCode`

pub mod config;
pub mod error;
pub mod handler;
pub mod intern;
pub mod token;
pub mod typed;

pub use config::{DuplicateToken, ParsePolicy, TrailingText};
pub use error::{AttributeError, ErrorCode, Result};
pub use handler::{
    AttributeHandler, ErasedEnum, ErasedTyped, IgnoreHandler, ProcessAttribute, UnknownHandler,
};
pub use intern::{InternHandler, InternId, InternTable};
pub use token::{EnumBuilder, EnumHandler, TokenTable};
pub use typed::{parse_value, TypedHandler};
