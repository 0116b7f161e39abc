//! Resources domain module.
//!
//! Read-only views of a video addressed by URI templates:
//! `youtube://transcripts/{video_id}` and `youtube://video/{video_id}`.
//!
//! ## Architecture
//!
//! - `definitions/` - One file per resource template
//! - `registry.rs` - Template metadata advertised to clients
//! - `service.rs` - URI routing and reads

pub mod definitions;
mod error;
mod registry;
mod service;

pub use definitions::ResourceTemplateDefinition;
pub use error::ResourceError;
pub use registry::{get_all_resource_templates, get_all_resources};
pub use service::ResourceService;
