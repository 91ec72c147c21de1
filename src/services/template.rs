//! Boot config rendering.
//!
//! Placeholders are `{key}`; `{{` and `}}` produce literal braces. The text
//! between the braces is the variable key verbatim, with no format specifiers.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("missing variable '{0}'")]
    MissingVariable(String),

    #[error("unbalanced brace at byte {0}")]
    MalformedTemplate(usize),
}

/// Substitute every `{key}` in `template` with its value from `variables`
pub fn render(template: &str, variables: &HashMap<String, String>) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        match c {
            '{' => {
                if chars.next_if(|&(_, next)| next == '{').is_some() {
                    out.push('{');
                    continue;
                }

                let start = offset + 1;
                let end = loop {
                    match chars.next() {
                        Some((close, '}')) => break close,
                        Some((_, '{')) | None => return Err(TemplateError::MalformedTemplate(offset)),
                        Some(_) => {}
                    }
                };

                let key = &template[start..end];
                let value = variables
                    .get(key)
                    .ok_or_else(|| TemplateError::MissingVariable(key.to_string()))?;
                out.push_str(value);
            }
            '}' => {
                if chars.next_if(|&(_, next)| next == '}').is_none() {
                    return Err(TemplateError::MalformedTemplate(offset));
                }
                out.push('}');
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}
