//! Prompt templates module.
//!
//! A small `{{variable}}` / `{{#if variable}}…{{else}}…{{/if}}` renderer.
//! Values are inserted in a single pass, so braces inside argument values
//! (transcripts often contain them) are never reinterpreted.

use rmcp::model::PromptArgument;
use std::collections::HashMap;

use super::error::PromptError;

const IF_OPEN: &str = "{{#if ";
const ELSE: &str = "{{else}}";
const END_IF: &str = "{{/if}}";

/// A prompt template that can be instantiated with arguments.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The unique name of the prompt.
    pub name: String,

    /// A description of what the prompt does.
    pub description: Option<String>,

    /// The arguments that this prompt accepts.
    pub arguments: Vec<PromptArgument>,

    /// The template string with placeholders.
    pub template: String,
}

impl PromptTemplate {
    /// Create a new prompt template.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        arguments: Vec<PromptArgument>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description,
            arguments,
            template: template.into(),
        }
    }

    /// Render the template with the given values.
    ///
    /// - `{{variable}}` is replaced with the value of `variable`, or nothing
    /// - `{{#if variable}}content{{/if}}` keeps content only if variable is non-empty
    /// - `{{#if variable}}content{{else}}alternative{{/if}}` with else support
    ///
    /// Conditionals do not nest.
    pub fn render(&self, values: &HashMap<String, String>) -> Result<String, PromptError> {
        let resolved = resolve_conditionals(&self.template, values)?;
        Ok(substitute(&resolved, values))
    }
}

fn is_set(values: &HashMap<String, String>, name: &str) -> bool {
    values.get(name).is_some_and(|v| !v.is_empty())
}

fn resolve_conditionals(
    template: &str,
    values: &HashMap<String, String>,
) -> Result<String, PromptError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(IF_OPEN) {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + IF_OPEN.len()..];

        let name_end = after_open
            .find("}}")
            .ok_or_else(|| PromptError::template("Unclosed {{#if}} tag"))?;
        let name = after_open[..name_end].trim();
        let body_and_rest = &after_open[name_end + 2..];

        let body_end = body_and_rest
            .find(END_IF)
            .ok_or_else(|| PromptError::template("Missing {{/if}} tag"))?;
        let body = &body_and_rest[..body_end];

        let (when_set, otherwise) = match body.find(ELSE) {
            Some(pos) => (&body[..pos], &body[pos + ELSE.len()..]),
            None => (body, ""),
        };
        out.push_str(if is_set(values, name) { when_set } else { otherwise });

        rest = &body_and_rest[body_end + END_IF.len()..];
    }

    out.push_str(rest);
    Ok(out)
}

fn substitute(template: &str, values: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let name = after[..end].trim();
                if let Some(value) = values.get(name) {
                    out.push_str(value);
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}
