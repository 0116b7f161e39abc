//! Resource Registry - central registration of all resource templates.
//!
//! When adding a new resource template:
//! 1. Create the definition file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it here in `get_all_resource_templates()`

use rmcp::model::{AnnotateAble, RawResourceTemplate, Resource, ResourceTemplate};

use super::definitions::{ResourceTemplateDefinition, TranscriptResource, VideoResource};

/// Build an annotated template from a definition.
fn build_template<R: ResourceTemplateDefinition>() -> ResourceTemplate {
    RawResourceTemplate {
        uri_template: R::URI_TEMPLATE.to_string(),
        name: R::NAME.to_string(),
        title: Some(R::TITLE.to_string()),
        description: Some(R::DESCRIPTION.to_string()),
        mime_type: Some(R::MIME_TYPE.to_string()),
    }
    .no_annotation()
}

/// Static resources. Every resource is addressed through a template.
pub fn get_all_resources() -> Vec<Resource> {
    Vec::new()
}

/// Get all registered resource templates.
pub fn get_all_resource_templates() -> Vec<ResourceTemplate> {
    vec![
        build_template::<TranscriptResource>(),
        build_template::<VideoResource>(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_static_resources() {
        assert!(get_all_resources().is_empty());
    }

    #[test]
    fn test_get_all_resource_templates() {
        let templates = get_all_resource_templates();
        assert_eq!(templates.len(), 2);

        let uri_templates: Vec<_> = templates
            .iter()
            .map(|t| t.raw.uri_template.as_str())
            .collect();
        assert!(uri_templates.contains(&"youtube://transcripts/{video_id}"));
        assert!(uri_templates.contains(&"youtube://video/{video_id}"));
        assert!(
            templates
                .iter()
                .all(|t| t.raw.mime_type.as_deref() == Some("text/plain"))
        );
    }
}
