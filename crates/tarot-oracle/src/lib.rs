//! Interpretation of tarot readings by language-model providers.
//!
//! A failed request never fails the reading: [`interpret`] returns an
//! [`Interpretation::Fallback`] carrying the reading's baseline text.

/// Error types for providers.
pub mod error;
/// Baseline fallback and attaching results to readings.
pub mod interpret;
/// Prompt construction.
pub mod prompt;
/// HTTP providers and provider resolution.
pub mod provider;

/// Re-export error types.
pub use error::{InterpretationError, InterpretationResult};
/// Re-export the interpretation entry points.
pub use interpret::{Interpretation, apply_interpretation, interpret};
/// Re-export prompt construction.
pub use prompt::build_prompt;
/// Re-export providers.
pub use provider::{
    AnthropicProvider, ChatCompletionsProvider, InterpretationProvider, provider_from_config,
};
