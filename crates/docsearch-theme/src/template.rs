//! Text templates for generated files.
//!
//! Provides a lightweight template system using string interpolation rather than
//! heavy template engines like Tera or Handlebars. A template source is compiled
//! once into a list of segments and can then be rendered any number of times.
//!
//! Syntax:
//!
//! - `{{ name }}` interpolates a required variable.
//! - `{{ name? }}` interpolates an optional variable, rendering nothing when unset.
//! - `{{#if name}} ... {{/if}}` renders its body only when `name` is set and
//!   non-empty. A block tag alone on its line removes that whole line.

use std::{
    collections::HashMap,
    sync::{
        OnceLock,
        atomic::{AtomicUsize, Ordering},
    },
};

use thiserror::Error;
use tracing::debug;

/// Template compilation and rendering errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// Missing required variable.
    #[error("missing required variable: {0}")]
    MissingVariable(String),

    /// Invalid template syntax.
    #[error("invalid template syntax in {template}: {message}")]
    InvalidSyntax { template: String, message: String },
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Template context with variables for interpolation.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    variables: HashMap<String, String>,
}

impl TemplateContext {
    /// Create a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable into the context.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Create context with initial variables.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a variable only when a value is present.
    pub fn with_optional_var(
        self,
        key: impl Into<String>,
        value: Option<impl Into<String>>,
    ) -> Self {
        match value {
            Some(value) => self.with_var(key, value),
            None => self,
        }
    }

    /// Get a variable value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Check if a variable exists.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }
}

/// Options applied while rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Escape XML special characters in interpolated values.
    pub auto_escape: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { auto_escape: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Variable { name: String, optional: bool },
    Section { name: String, body: Vec<Segment> },
}

enum Tag<'a> {
    Variable { name: &'a str, optional: bool },
    Open(&'a str),
    Close,
}

/// A template compiled into renderable segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTemplate {
    name: String,
    segments: Vec<Segment>,
}

impl CompiledTemplate {
    /// Compile a template source.
    pub fn compile(name: impl Into<String>, source: &str) -> Result<Self> {
        let name = name.into();
        let syntax_error = |message: String| TemplateError::InvalidSyntax {
            template: name.clone(),
            message,
        };

        let mut open_sections: Vec<(String, Vec<Segment>)> = Vec::new();
        let mut current: Vec<Segment> = Vec::new();
        let mut rest = source;
        let mut at_line_start = true;

        while let Some(start) = rest.find("{{") {
            let after_open = &rest[start + 2..];
            let end = after_open
                .find("}}")
                .ok_or_else(|| syntax_error("unclosed {{ delimiter".to_string()))?;

            let tag = parse_tag(after_open[..end].trim()).map_err(syntax_error)?;
            let mut text = &rest[..start];
            let mut remainder = &after_open[end + 2..];

            let mut standalone = false;
            if !matches!(tag, Tag::Variable { .. }) {
                if let Some((indent, skip)) = standalone_line(text, remainder, at_line_start) {
                    text = &text[..text.len() - indent];
                    remainder = &remainder[skip..];
                    standalone = true;
                }
            }

            push_text(&mut current, text);

            match tag {
                Tag::Variable { name, optional } => current.push(Segment::Variable {
                    name: name.to_string(),
                    optional,
                }),
                Tag::Open(section) => {
                    open_sections.push((section.to_string(), std::mem::take(&mut current)));
                }
                Tag::Close => {
                    let (section, parent) = open_sections.pop().ok_or_else(|| {
                        syntax_error("{{/if}} without matching {{#if}}".to_string())
                    })?;
                    let body = std::mem::replace(&mut current, parent);
                    current.push(Segment::Section {
                        name: section,
                        body,
                    });
                }
            }

            at_line_start = standalone;
            rest = remainder;
        }

        push_text(&mut current, rest);

        if let Some((section, _)) = open_sections.last() {
            return Err(syntax_error(format!("unclosed {{{{#if {section}}}}} section")));
        }

        Ok(Self {
            name,
            segments: current,
        })
    }

    /// Get the template name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the template with the given context.
    pub fn render(&self, context: &TemplateContext, config: &RenderConfig) -> Result<String> {
        let mut output = String::new();
        render_segments(&self.segments, context, config, &mut output)?;
        Ok(output)
    }
}

fn parse_tag(tag: &str) -> std::result::Result<Tag<'_>, String> {
    if let Some(section) = tag.strip_prefix("#if ") {
        let section = section.trim();
        if section.is_empty() {
            return Err("{{#if}} needs a variable name".to_string());
        }
        return Ok(Tag::Open(section));
    }

    if tag == "/if" {
        return Ok(Tag::Close);
    }

    if tag.starts_with('#') || tag.starts_with('/') {
        return Err(format!("unknown block tag: {tag}"));
    }

    let (name, optional) = match tag.strip_suffix('?') {
        Some(stripped) => (stripped.trim_end(), true),
        None => (tag, false),
    };
    if name.is_empty() {
        return Err("empty variable name".to_string());
    }

    Ok(Tag::Variable { name, optional })
}

/// If a block tag sits alone on its line, returns how many indentation bytes to
/// drop from the preceding text and how many bytes to skip after the tag
/// (through the line break).
fn standalone_line(before: &str, after: &str, at_line_start: bool) -> Option<(usize, usize)> {
    let indent = match before.rfind('\n') {
        Some(newline) => &before[newline + 1..],
        None if at_line_start => before,
        None => return None,
    };
    if !indent.trim().is_empty() {
        return None;
    }

    let line_end = after.find('\n');
    let trailing = &after[..line_end.unwrap_or(after.len())];
    if !trailing.trim().is_empty() {
        return None;
    }

    Some((indent.len(), line_end.map_or(after.len(), |i| i + 1)))
}

fn push_text(segments: &mut Vec<Segment>, text: &str) {
    if !text.is_empty() {
        segments.push(Segment::Text(text.to_string()));
    }
}

fn render_segments(
    segments: &[Segment],
    context: &TemplateContext,
    config: &RenderConfig,
    output: &mut String,
) -> Result<()> {
    for segment in segments {
        match segment {
            Segment::Text(text) => output.push_str(text),
            Segment::Variable { name, optional } => match context.get(name) {
                Some(value) if config.auto_escape => output.push_str(&escape_xml(value)),
                Some(value) => output.push_str(value),
                None if *optional => {}
                None => return Err(TemplateError::MissingVariable(name.clone())),
            },
            Segment::Section { name, body } => {
                if context.get(name).is_some_and(|value| !value.is_empty()) {
                    render_segments(body, context, config, output)?;
                }
            }
        }
    }
    Ok(())
}

/// Escape special XML characters.
#[must_use]
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// A template compiled on first use and kept for the rest of the process.
///
/// The source never changes, so the cache holds a single entry that is never
/// invalidated. A compile failure is cached as well and returned on every call.
#[derive(Debug)]
pub struct TemplateCache {
    name: &'static str,
    source: &'static str,
    compiled: OnceLock<Result<CompiledTemplate>>,
    compilations: AtomicUsize,
}

impl TemplateCache {
    /// Create an empty cache for a fixed template source.
    #[must_use]
    pub const fn new(name: &'static str, source: &'static str) -> Self {
        Self {
            name,
            source,
            compiled: OnceLock::new(),
            compilations: AtomicUsize::new(0),
        }
    }

    /// Get the compiled template, compiling it on the first call.
    pub fn get(&self) -> Result<&CompiledTemplate> {
        self.compiled
            .get_or_init(|| {
                self.compilations.fetch_add(1, Ordering::Relaxed);
                debug!(template = self.name, "compiling template");
                CompiledTemplate::compile(self.name, self.source)
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Number of times the source has been compiled.
    #[must_use]
    pub fn compilations(&self) -> usize {
        self.compilations.load(Ordering::Relaxed)
    }

    /// Whether the template has been compiled yet.
    #[must_use]
    pub fn is_compiled(&self) -> bool {
        self.compiled.get().is_some()
    }
}
