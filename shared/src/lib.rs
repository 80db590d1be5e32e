//! Shared library for the StaySmart Lambda functions.
//!
//! The Lambda binaries are thin: they initialise tracing, build a handler from
//! [`Config`] once per cold start, and forward every event to it.

pub mod clean;
pub mod completion;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod prompt;
pub mod rewrite;

pub use clean::CleanHandler;
pub use completion::{CompletionService, OpenAiClient, UpstreamError};
pub use config::Config;
pub use error::{Error, Result};
pub use models::{ErrorBody, FieldValue, MessageBody, RewriteRequest};
pub use prompt::{build_prompt, PromptPair, PromptSpec};
pub use rewrite::RewriteHandler;
