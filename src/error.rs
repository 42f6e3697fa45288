// ============================================================================
// error.rs — Aviary
// Error taxonomy: fatal configuration faults and engine faults.
// ============================================================================

use thiserror::Error;

/// Fault raised by the external engine. Opaque to the viewer; any engine
/// failure is fatal to the render loop.
#[derive(Clone, Debug, Error)]
#[error("{0}")]
pub struct EngineError(pub String);

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Top-level viewer errors. There are no transient or retryable conditions:
/// configuration errors prevent the loop from starting, engine errors stop it.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}
