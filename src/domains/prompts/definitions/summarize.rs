//! Video summary prompt definition.

use super::{PromptDefinition, video_id_argument};
use rmcp::model::PromptArgument;

/// Summarize a video from its transcript.
pub struct SummarizePrompt;

impl PromptDefinition for SummarizePrompt {
    const NAME: &'static str = "youtube/summarize";
    const DESCRIPTION: &'static str = "Create a prompt for summarizing a YouTube video from its transcript";

    fn template() -> &'static str {
        r#"Summarize this YouTube video based on its transcript:
{{#if metadata}}
{{metadata}}
{{/if}}
Transcript:
{{transcript}}

Please provide:
1. A concise 2-3 sentence summary
2. 3-5 key points in bullet form
3. Any technical details mentioned
4. The main takeaways from this video
"#
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![video_id_argument()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_prompt_metadata() {
        assert_eq!(SummarizePrompt::NAME, "youtube/summarize");

        let args = SummarizePrompt::arguments();
        assert_eq!(args.len(), 1);
        assert_eq!(args[0].name, "video_id");
        assert_eq!(args[0].required, Some(true));
    }
}
