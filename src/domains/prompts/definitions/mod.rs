//! Prompt definitions module.
//!
//! Each prompt is defined in its own file with its metadata, arguments and
//! template. Every prompt takes a `video_id`; the service adds `transcript`
//! and, when available, `metadata` before rendering.
//!
//! ## Adding a New Prompt
//!
//! 1. Create a new file (e.g., `my_prompt.rs`)
//! 2. Implement the `PromptDefinition` trait
//! 3. Export it here
//! 4. Register in `registry.rs`

mod query;
mod summarize;

pub use query::QueryPrompt;
pub use summarize::SummarizePrompt;

use rmcp::model::PromptArgument;

/// Trait for prompt definitions.
pub trait PromptDefinition {
    /// The unique name of the prompt.
    const NAME: &'static str;

    /// A description of what the prompt does.
    const DESCRIPTION: &'static str;

    /// The template string with {{variable}} placeholders.
    fn template() -> &'static str;

    /// The arguments this prompt accepts.
    fn arguments() -> Vec<PromptArgument>;
}

/// The `video_id` argument shared by every prompt.
pub(crate) fn video_id_argument() -> PromptArgument {
    PromptArgument {
        name: "video_id".to_string(),
        title: None,
        description: Some("YouTube video ID".to_string()),
        required: Some(true),
    }
}
