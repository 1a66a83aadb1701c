//! Reusable in-memory rendering buffer.

use super::{Stub, Substitutions};

/// A stub used as a staging buffer for one patch fragment.
///
/// The buffer is filled with entity-specific text right before a splice and
/// must be [`reset`](ScratchBuffer::reset) afterwards so the next fill never
/// sees stale content.
#[derive(Debug, Clone)]
pub struct ScratchBuffer {
    stub: Stub,
    rendered: Option<String>,
}

impl ScratchBuffer {
    pub fn new(stub: Stub) -> Self {
        Self {
            stub,
            rendered: None,
        }
    }

    /// Render the stub into the buffer and return the rendered text.
    pub fn fill(&mut self, substitutions: &Substitutions) -> &str {
        self.rendered.insert(self.stub.render(substitutions))
    }

    /// Drop rendered content, returning to the placeholder-only template.
    pub fn reset(&mut self) {
        self.rendered = None;
    }

    /// Whether the buffer holds only its template.
    pub fn is_pristine(&self) -> bool {
        self.rendered.is_none()
    }
}
