//! Reasoning collaborators.
//!
//! - [`traits`]: the [`ReasoningClient`] contract
//! - [`anthropic`]: HTTP client for the Anthropic Messages API
//! - [`retry`]: backoff decorator for transient failures

pub mod anthropic;
pub mod retry;
pub mod traits;

pub use anthropic::{AnthropicClient, AnthropicConfig};
pub use retry::{RetryConfig, RetryingReasoningClient};
pub use traits::{ReasoningClient, ReasoningRequest};
