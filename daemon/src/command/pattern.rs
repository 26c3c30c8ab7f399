use regex::Regex;
use std::fmt;
use thiserror::Error;

/// Token that marks a positional capture inside a template.
pub const WILDCARD: &str = "*";

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("template is empty")]
    Empty,

    #[error("pattern has no templates")]
    NoTemplates,

    #[error("wildcard must be a separate token in '{template}', found '{token}'")]
    EmbeddedWildcard { template: String, token: String },

    #[error("alias '{template}' has {found} wildcard(s), expected {expected}")]
    ArityMismatch {
        template: String,
        expected: usize,
        found: usize,
    },

    #[error("failed to compile template '{template}': {source}")]
    Regex {
        template: String,
        #[source]
        source: regex::Error,
    },
}

/// A single phrasing compiled into an anchored, case-insensitive matcher.
///
/// `"navigate to * page"` compiles to `(?is)^navigate\s+to\s+(.*?)\s+page$`:
/// literal tokens must appear at contiguous whitespace-separated positions and
/// each wildcard captures the shortest run that lets the rest of the template
/// match.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
    regex: Regex,
    wildcards: usize,
}

impl Template {
    pub fn compile(template: &str) -> Result<Self, TemplateError> {
        let mut wildcards = 0;
        let mut parts = Vec::new();

        for token in template.split_whitespace() {
            if token == WILDCARD {
                wildcards += 1;
                parts.push("(.*?)".to_string());
            } else if token.contains(WILDCARD) {
                return Err(TemplateError::EmbeddedWildcard {
                    template: template.to_string(),
                    token: token.to_string(),
                });
            } else {
                parts.push(regex::escape(token));
            }
        }

        if parts.is_empty() {
            return Err(TemplateError::Empty);
        }

        let expression = format!(r"(?is)^{}$", parts.join(r"\s+"));
        let regex = Regex::new(&expression).map_err(|source| TemplateError::Regex {
            template: template.to_string(),
            source,
        })?;

        tracing::debug!("Compiled template '{}' -> {}", template, expression);

        Ok(Self {
            source: template.to_string(),
            regex,
            wildcards,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn wildcard_count(&self) -> usize {
        self.wildcards
    }

    /// Match the whole (trimmed) transcript and return one trimmed capture per
    /// wildcard, left to right.
    pub fn captures(&self, transcript: &str) -> Option<Vec<String>> {
        let caps = self.regex.captures(transcript.trim())?;
        Some(
            (1..=self.wildcards)
                .map(|i| caps.get(i).map_or("", |m| m.as_str()).trim().to_string())
                .collect(),
        )
    }
}

/// Callback bound to a pattern. Receives the action context and the captures.
pub type Action<C> = Box<dyn Fn(&mut C, &[String]) + Send + Sync>;

/// One logical command: a list of alias templates sharing a single action.
pub struct CommandPattern<C> {
    templates: Vec<Template>,
    action: Action<C>,
}

impl<C> CommandPattern<C> {
    pub fn new<I, S, F>(templates: I, action: F) -> Result<Self, TemplateError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&mut C, &[String]) + Send + Sync + 'static,
    {
        let templates = templates
            .into_iter()
            .map(|t| Template::compile(t.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let first = templates.first().ok_or(TemplateError::NoTemplates)?;
        let expected = first.wildcard_count();
        if let Some(bad) = templates.iter().find(|t| t.wildcard_count() != expected) {
            return Err(TemplateError::ArityMismatch {
                template: bad.as_str().to_string(),
                expected,
                found: bad.wildcard_count(),
            });
        }

        Ok(Self {
            templates,
            action: Box::new(action),
        })
    }

    /// Number of captures handed to the action.
    pub fn arity(&self) -> usize {
        self.templates[0].wildcard_count()
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Try each alias in listed order; the first one that matches wins.
    pub fn captures(&self, transcript: &str) -> Option<Vec<String>> {
        self.templates.iter().find_map(|t| t.captures(transcript))
    }

    pub(crate) fn invoke(&self, ctx: &mut C, captures: &[String]) {
        (self.action)(ctx, captures)
    }
}

impl<C> fmt::Debug for CommandPattern<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandPattern")
            .field(
                "templates",
                &self.templates.iter().map(Template::as_str).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}
