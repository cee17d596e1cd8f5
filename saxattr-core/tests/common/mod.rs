//! Test infrastructure for attribute handlers
//!
//! Provides a miniature dispatch table and a document feeder that behaves
//! like a streaming engine: attributes arrive in order through a buffer
//! that is overwritten between calls.

#![allow(dead_code)]

mod harness;

pub use harness::{init_tracing, Dispatch, Element};
