//! Instruction templates with `{{variable}}` substitution.

use std::collections::HashMap;

/// Result alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors that can occur during template rendering.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// A required variable was not provided.
    #[error("missing required variable: {name}")]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
    },
}

/// A prompt template with `{{variable}}` placeholders.
///
/// Rendering is a single pass over the template text, so substituted values
/// are emitted verbatim even if they contain `{{...}}` themselves.
///
/// # Examples
///
/// ```
/// use prompt_builder::template::PromptTemplate;
///
/// let template = PromptTemplate::new("场景: {{scene}}").with_required_variable("scene");
/// let rendered = template.render(&[("scene", "竹林")].into()).unwrap();
/// assert_eq!(rendered, "场景: 竹林");
/// ```
#[derive(Clone, Debug)]
pub struct PromptTemplate {
    template: String,
    required_variables: Vec<String>,
}

impl PromptTemplate {
    /// Creates a template from the supplied text.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            required_variables: Vec::new(),
        }
    }

    /// Declares a variable that must be supplied at render time.
    #[must_use]
    pub fn with_required_variable(mut self, name: impl Into<String>) -> Self {
        self.required_variables.push(name.into());
        self
    }

    /// Renders the template. Unknown optional variables render as empty text.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingVariable`] if a required variable is not
    /// present in `vars`.
    pub fn render(&self, vars: &HashMap<&str, &str>) -> TemplateResult<String> {
        if let Some(name) = self
            .required_variables
            .iter()
            .find(|name| !vars.contains_key(name.as_str()))
        {
            return Err(TemplateError::MissingVariable { name: name.clone() });
        }

        let mut out = String::with_capacity(self.template.len() + 256);
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after_open = &rest[start + 2..];
            let Some(end) = after_open.find("}}") else {
                // unterminated placeholder stays literal
                out.push_str(&rest[start..]);
                return Ok(out);
            };
            let name = after_open[..end].trim();
            out.push_str(vars.get(name).copied().unwrap_or_default());
            rest = &after_open[end + 2..];
        }
        out.push_str(rest);

        Ok(out)
    }
}
