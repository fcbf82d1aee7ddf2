//! Rendering configured path templates into a validated layout.

use anyhow::{Context, Result, anyhow};
use minijinja::{Environment, UndefinedBehavior, context};

use crate::domain::model::{Layout, PathEntry};
use crate::infra::config::Config;

/// Expands `{{ project_name }}` (and rejects unknown placeholders) in layout entries.
pub struct LayoutRenderer {
    env: Environment<'static>,
}

impl LayoutRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        Self { env }
    }

    /// Render and validate every configured entry, preserving order.
    pub fn render(&self, config: &Config) -> Result<Layout> {
        let ctx = context! { project_name => config.project.name() };

        let mut entries = Vec::with_capacity(config.layout.files().len());
        for raw in config.layout.files() {
            let rendered = self
                .env
                .render_str(raw, &ctx)
                .map_err(|err| anyhow!("failed to render layout entry '{raw}': {err}"))?;
            let entry = PathEntry::parse(&rendered)
                .with_context(|| format!("invalid layout entry '{raw}'"))?;
            entries.push(entry);
        }

        let layout = Layout::new(entries);
        if layout.is_empty() {
            tracing::warn!("layout has no entries; nothing to scaffold");
        }
        Ok(layout)
    }
}

impl Default for LayoutRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::config::LayoutConfig;

    fn config_with(name: &str, files: &[&str]) -> Config {
        let mut config = Config::default();
        config.project.name = Some(name.into());
        config.layout = LayoutConfig {
            files: Some(files.iter().map(|file| file.to_string()).collect()),
        };
        config
    }

    #[test]
    fn substitutes_project_name() -> Result<()> {
        let config = config_with("detector", &["src/{{ project_name }}/__init__.py", "setup.py"]);
        let layout = LayoutRenderer::new().render(&config)?;
        let rendered: Vec<_> = layout.entries().iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["src/detector/__init__.py", "setup.py"]);
        Ok(())
    }

    #[test]
    fn unknown_placeholder_is_an_error() {
        let config = config_with("detector", &["src/{{ package }}/__init__.py"]);
        let err = LayoutRenderer::new().render(&config).unwrap_err();
        assert!(err.to_string().contains("failed to render layout entry"));
    }

    #[test]
    fn rendered_entries_are_validated() {
        let config = config_with("..", &["{{ project_name }}/escape.txt"]);
        let err = LayoutRenderer::new().render(&config).unwrap_err();
        assert!(err.to_string().contains("invalid layout entry"));
    }

    #[test]
    fn builtin_layout_renders_fifteen_entries() -> Result<()> {
        let layout = LayoutRenderer::new().render(&Config::builtin()?)?;
        assert_eq!(layout.len(), 15);
        assert_eq!(
            layout.entries()[1].to_string(),
            "src/cnnClassifier/__init__.py"
        );
        Ok(())
    }
}
