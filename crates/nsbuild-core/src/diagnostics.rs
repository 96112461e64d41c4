//! Diagnostics sink for resolution events
//!
//! The resolver reports what it selected and what it rewrote through an
//! explicit sink owned by the hook, scoped to one build invocation.

/// Receiver for resolution diagnostics.
pub trait DiagnosticSink {
    /// Record one diagnostic message.
    fn emit(&mut self, message: &str);
}

/// Forwards diagnostics to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, message: &str) {
        tracing::debug!("{message}");
    }
}

/// Collects diagnostics in memory; used by tests.
#[derive(Debug, Default)]
pub struct BufferSink {
    messages: Vec<String>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The messages recorded so far, in emission order.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl DiagnosticSink for BufferSink {
    fn emit(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}
