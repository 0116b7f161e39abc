//! Grounded question prompt definition.

use super::{PromptDefinition, video_id_argument};
use rmcp::model::PromptArgument;

/// Ask a question answered only from the video's transcript.
pub struct QueryPrompt;

impl PromptDefinition for QueryPrompt {
    const NAME: &'static str = "youtube/query";
    const DESCRIPTION: &'static str = "Create a prompt for answering a question strictly from a YouTube video's transcript";

    fn template() -> &'static str {
        r#"Answer this question based ONLY on the content of this YouTube video:
{{#if metadata}}
{{metadata}}
{{/if}}
Question: {{query}}

Transcript:
{{transcript}}

If the transcript doesn't contain information to answer this question, please state that clearly.
"#
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![
            video_id_argument(),
            PromptArgument {
                name: "query".to_string(),
                title: None,
                description: Some("The question to answer".to_string()),
                required: Some(true),
            },
        ]
    }
}
