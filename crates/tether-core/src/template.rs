//! Path template rendering
//!
//! Templates use named `{placeholder}` segments, e.g.
//! `/shopping-carts/{id}`. Rendering happens before any network activity,
//! so a missing value fails the invocation without consuming the retry
//! budget.

use crate::error::TemplateError;
use crate::types::PathParams;

/// Render a path template by substituting named placeholders
///
/// Substituted values are percent-encoded so a value containing `/` or
/// other reserved characters cannot alter the path structure.
///
/// # Errors
///
/// - `TemplateError::MissingParam` if a placeholder has no supplied value
/// - `TemplateError::EmptyPlaceholder` for `{}` in the template
/// - `TemplateError::UnclosedPlaceholder` for a `{` without a matching `}`
///
/// # Example
///
/// ```rust
/// use tether_core::{render_path, PathParams};
///
/// let params = PathParams::new().with("id", "42");
/// let path = render_path("/shopping-carts/{id}", &params).unwrap();
/// assert_eq!(path, "/shopping-carts/42");
/// ```
pub fn render_path(template: &str, params: &PathParams) -> Result<String, TemplateError> {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        rendered.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        let close = after_open
            .find('}')
            .ok_or_else(|| TemplateError::UnclosedPlaceholder(template.to_string()))?;

        let name = &after_open[..close];
        if name.is_empty() {
            return Err(TemplateError::EmptyPlaceholder(template.to_string()));
        }
        if name.contains('{') {
            return Err(TemplateError::UnclosedPlaceholder(template.to_string()));
        }

        let value = params.get(name).ok_or_else(|| TemplateError::MissingParam {
            name: name.to_string(),
            template: template.to_string(),
        })?;

        rendered.push_str(&urlencoding::encode(value));
        rest = &after_open[close + 1..];
    }

    rendered.push_str(rest);
    Ok(rendered)
}

/// List the placeholder names a template requires, in order of appearance
///
/// Useful for validating a declared operation at registration time
/// instead of on the first invocation.
pub fn template_params(template: &str) -> Result<Vec<String>, TemplateError> {
    let mut names = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let after_open = &rest[open + 1..];
        let close = after_open
            .find('}')
            .ok_or_else(|| TemplateError::UnclosedPlaceholder(template.to_string()))?;

        let name = &after_open[..close];
        if name.is_empty() {
            return Err(TemplateError::EmptyPlaceholder(template.to_string()));
        }
        if name.contains('{') {
            return Err(TemplateError::UnclosedPlaceholder(template.to_string()));
        }

        names.push(name.to_string());
        rest = &after_open[close + 1..];
    }

    Ok(names)
}
