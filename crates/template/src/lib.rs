//! Literal `{{key}}` placeholder substitution over an immutable template
//! body, with HTML escaping applied to every substituted value. No loops,
//! no conditionals, no includes.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template file does not exist or could not be read.
    #[error("template file not found: {path}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Substitution input: an insertion-ordered list of `(key, value)` pairs.
/// Values are stored in textual form; escaping happens at render time.
#[derive(Debug, Clone, Default)]
pub struct Context {
    entries: Vec<(String, String)>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a key. Overwriting an existing key keeps its original
    /// position; new keys are appended, and render passes run in this
    /// insertion order.
    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder form of [`Context::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A template body loaded once and held for the renderer's lifetime.
/// There is no re-read and no reload-on-change.
#[derive(Debug, Clone)]
pub struct Template {
    body: String,
}

impl Template {
    /// Read the template body from `path`. Fails immediately when the
    /// source is missing; nothing is retained on failure.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        let body = fs::read_to_string(path).map_err(|source| TemplateError::NotFound {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { body })
    }

    /// Build a template directly from an in-memory body.
    pub fn from_body(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Replace every `{{key}}` occurrence with the HTML-escaped value, one
    /// pass per context entry in insertion order. An empty context returns
    /// the body byte-for-byte, untouched by any escaping pass. Keys absent
    /// from the context leave their placeholder text verbatim.
    ///
    /// Passes are sequential over the current content: a substituted value
    /// that literally contains a later key's placeholder is itself
    /// substituted on that later pass.
    pub fn render(&self, data: &Context) -> String {
        if data.is_empty() {
            return self.body.clone();
        }

        let mut content = self.body.clone();
        for (key, value) in data.iter() {
            let placeholder = format!("{{{{{}}}}}", key);
            content = content.replace(&placeholder, &escape_html(value));
        }
        content
    }
}

/// Double-quote-aware HTML escaping: `&`, `<`, `>`, and `"` become
/// entities; everything else passes through unchanged.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
