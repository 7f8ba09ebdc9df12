//! Template expansion for settings documents.
//!
//! Documents are expanded before they are parsed, so a value can be pulled
//! from the process environment:
//!
//! - `${NAME}` - Substitutes the value of variable `NAME`
//! - `${NAME:-fallback}` - Substitutes `fallback` when `NAME` is unset
//! - `$$` - Renders as literal `$`
//!
//! A `$` followed by anything else is kept as-is. Undefined variables without
//! a fallback are an error rather than an empty substitution.

use std::fmt;

/// Error type for template expansion failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A variable was referenced but not defined and has no fallback.
    UndefinedVariable {
        /// The name of the undefined variable.
        name: String,
        /// Byte offset of the `${` in the document.
        position: usize,
    },
    /// A `${` was found without a matching `}`.
    UnmatchedBrace { position: usize },
    /// An empty variable name was found (e.g., `${}`).
    EmptyVariableName { position: usize },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::UndefinedVariable { name, position } => {
                write!(
                    f,
                    "undefined variable '{}' at position {} in document",
                    name, position
                )
            }
            TemplateError::UnmatchedBrace { position } => {
                write!(f, "unmatched '${{' at position {} in document", position)
            }
            TemplateError::EmptyVariableName { position } => {
                write!(
                    f,
                    "empty variable name '${{}}' at position {} in document",
                    position
                )
            }
        }
    }
}

impl std::error::Error for TemplateError {}

/// Expand a document using `lookup` to resolve variable names.
pub fn expand<F>(template: &str, lookup: F) -> Result<String, TemplateError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        if ch != '$' {
            result.push(ch);
            continue;
        }

        match chars.peek() {
            Some((_, '$')) => {
                chars.next();
                result.push('$');
            }
            Some((_, '{')) => {
                chars.next();
                let mut body = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, c)) => body.push(c),
                        None => return Err(TemplateError::UnmatchedBrace { position: pos }),
                    }
                }

                let (name, fallback) = match body.split_once(":-") {
                    Some((name, fallback)) => (name.trim(), Some(fallback)),
                    None => (body.trim(), None),
                };

                if name.is_empty() {
                    return Err(TemplateError::EmptyVariableName { position: pos });
                }

                match (lookup(name), fallback) {
                    (Some(value), _) => result.push_str(&value),
                    (None, Some(fallback)) => result.push_str(fallback),
                    (None, None) => {
                        return Err(TemplateError::UndefinedVariable {
                            name: name.to_string(),
                            position: pos,
                        });
                    }
                }
            }
            _ => result.push('$'),
        }
    }

    Ok(result)
}

/// Expand a document against the process environment.
pub fn expand_env(template: &str) -> Result<String, TemplateError> {
    expand(template, |name| std::env::var(name).ok())
}
