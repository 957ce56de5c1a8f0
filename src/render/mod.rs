//! Template rendering module
//!
//! Wraps a minijinja environment with a path loader so pages are rendered
//! from HTML files in the configured template directory.

use minijinja::{path_loader, Environment, Value};

/// Template engine handle
///
/// Templates are loaded from disk on first use and cached for the process
/// lifetime. Shared read-only across connection tasks.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new(template_dir: &str) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(template_dir));
        Self { env }
    }

    /// Render a template by file name with the given variables
    pub fn render(&self, name: &str, vars: Value) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(vars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_render_index() {
        let templates = Templates::new("templates");
        let html = templates
            .render("index.html", context! { title => "Home", current_year => 2026 })
            .unwrap();
        assert!(html.contains("Home"));
        assert!(html.contains("2026"));
    }

    #[test]
    fn test_missing_template_is_error() {
        let templates = Templates::new("templates");
        let result = templates.render("no-such-page.html", context! {});
        assert!(result.is_err());
    }
}
