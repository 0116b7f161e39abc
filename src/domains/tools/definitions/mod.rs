//! Tool definitions module.
//!
//! One file per tool. Each exports its parameter struct, its data struct
//! and a unit type implementing [`ToolHandler`](super::handlers::ToolHandler).

pub mod comments;
pub mod likes;
pub mod query;
pub mod search;
pub mod summarize;
pub mod transcript;

pub use comments::{GetCommentsParams, GetCommentsTool};
pub use likes::{GetLikesParams, GetLikesTool};
pub use query::{QueryParams, QueryTool};
pub use search::{SearchParams, SearchTool};
pub use summarize::{SummarizeParams, SummarizeTool};
pub use transcript::{GetTranscriptParams, GetTranscriptTool};
