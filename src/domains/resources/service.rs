//! Resource service implementation.
//!
//! Lists the `youtube://` templates and resolves reads against the shared
//! upstream services.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents, ResourceTemplate};
use std::sync::Arc;
use tracing::{info, instrument};

use super::definitions::{ResourceTemplateDefinition, TranscriptResource, VideoResource};
use super::error::ResourceError;
use super::registry::{get_all_resource_templates, get_all_resources};
use crate::core::services::Services;

const SCHEME: &str = "youtube://";

/// Service for listing and reading resources.
pub struct ResourceService {
    services: Arc<Services>,

    /// Resource templates for parameterized resources.
    templates: Vec<ResourceTemplate>,
}

impl ResourceService {
    /// Create a new ResourceService over the shared upstream services.
    pub fn new(services: Arc<Services>) -> Self {
        info!("Initializing ResourceService");
        Self {
            services,
            templates: get_all_resource_templates(),
        }
    }

    /// List all available resources.
    pub async fn list_resources(&self) -> Vec<Resource> {
        get_all_resources()
    }

    /// List all available resource templates.
    pub async fn list_resource_templates(&self) -> Vec<ResourceTemplate> {
        self.templates.clone()
    }

    /// Read a resource by URI.
    #[instrument(skip(self))]
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let text = if let Some(video_id) = TranscriptResource::match_uri(uri) {
            TranscriptResource::read(video_id?, &self.services).await?
        } else if let Some(video_id) = VideoResource::match_uri(uri) {
            VideoResource::read(video_id?, &self.services).await?
        } else if uri.starts_with(SCHEME) {
            return Err(ResourceError::not_found(uri));
        } else {
            return Err(ResourceError::invalid_uri(uri));
        };

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, uri)],
        })
    }
}
