//! Variable substitution over raw configuration text.

use handlebars::Handlebars;

use crate::error::{CoreError, CoreResult};
use crate::variables::Variables;

/// Renders `{{ var.NAME }}` references in raw text.
///
/// Output is not HTML-escaped and unknown variables render as empty text.
pub struct Substitutor {
    handlebars: Handlebars<'static>,
}

impl Default for Substitutor {
    fn default() -> Self {
        Self::new()
    }
}

impl Substitutor {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        handlebars.register_escape_fn(handlebars::no_escape);
        Self { handlebars }
    }

    pub fn render(&self, text: &str, variables: &Variables) -> CoreResult<String> {
        self.handlebars
            .render_template(text, &variables.context())
            .map_err(|e| CoreError::Substitution(e.to_string()))
    }
}
