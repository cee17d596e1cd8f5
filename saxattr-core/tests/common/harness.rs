//! Dispatch harness for running attribute sequences through handlers

use std::collections::BTreeMap;

use saxattr_core::{AttributeError, AttributeHandler, ProcessAttribute};

/// One start-element event: name plus attributes in source order.
pub struct Element<'a> {
    pub name: &'a str,
    pub attrs: &'a [(&'a str, &'a str)],
}

/// Name → handler table with a fallback for unmapped names.
pub struct Dispatch<'h> {
    handlers: BTreeMap<String, AttributeHandler<'h>>,
    fallback: AttributeHandler<'h>,
}

impl<'h> Dispatch<'h> {
    /// Unmapped attributes are reported as unknown.
    pub fn new() -> Self {
        Self::with_fallback(AttributeHandler::unknown())
    }

    pub fn with_fallback(fallback: AttributeHandler<'h>) -> Self {
        Self {
            handlers: BTreeMap::new(),
            fallback,
        }
    }

    pub fn on(mut self, name: &str, handler: impl Into<AttributeHandler<'h>>) -> Self {
        self.handlers.insert(name.to_string(), handler.into());
        self
    }

    /// Remove the handler for `name`, e.g. to keep its table.
    pub fn take(&mut self, name: &str) -> Option<AttributeHandler<'h>> {
        self.handlers.remove(name)
    }

    /// Feed every attribute of every element, in document order.
    ///
    /// Values are copied into one scratch buffer that is cleared before
    /// each call, so handlers only ever see transient text. Errors are
    /// collected and the walk continues.
    pub fn run(&mut self, elements: &[Element<'_>]) -> Vec<AttributeError> {
        let mut errors = Vec::new();
        let mut buffer = String::new();
        for element in elements {
            tracing::debug!(element = element.name, attrs = element.attrs.len(), "start element");
            for (name, value) in element.attrs {
                buffer.clear();
                buffer.push_str(value);
                let handler = self.handlers.get_mut(*name).unwrap_or(&mut self.fallback);
                if let Err(err) = handler.process(name, &buffer) {
                    errors.push(err);
                }
            }
        }
        errors
    }
}

/// Install a subscriber honoring `RUST_LOG`, once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
