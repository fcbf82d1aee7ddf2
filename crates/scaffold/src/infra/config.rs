//! Configuration management utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-layout.toml"));
static DEFAULT_WORKSPACE_CONFIG_PATH: &str = "scaffold.toml";
const DEFAULT_PROJECT_NAME: &str = "cnnClassifier";

/// Layered configuration loaded from the embedded default, user, workspace, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub project: Project,
    #[serde(default)]
    pub layout: LayoutConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Project {
    #[serde(default)]
    pub name: Option<String>,
}

impl Project {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_PROJECT_NAME)
    }
}

/// Ordered path templates. `{{ project_name }}` is substituted before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LayoutConfig {
    #[serde(default)]
    pub files: Option<Vec<String>>,
}

impl LayoutConfig {
    pub fn files(&self) -> &[String] {
        self.files.as_deref().unwrap_or_default()
    }
}

/// Where the workspace layer comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceSource {
    /// `scaffold.toml` under the project root, used only when present.
    Discovered(PathBuf),
    /// A file named on the command line; it must exist.
    Explicit(PathBuf),
}

impl WorkspaceSource {
    pub fn for_root(root: &Path, explicit: Option<&Path>) -> Self {
        match explicit {
            Some(path) => WorkspaceSource::Explicit(path.to_path_buf()),
            None => WorkspaceSource::Discovered(root.join(DEFAULT_WORKSPACE_CONFIG_PATH)),
        }
    }
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    project_name: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            project_name: env::var("SCAFFOLD_PROJECT_NAME")
                .ok()
                .filter(|value| !value.trim().is_empty()),
        }
    }

    #[cfg(test)]
    fn for_tests(project_name: &str) -> Self {
        Self {
            project_name: Some(project_name.to_owned()),
        }
    }
}

impl Config {
    /// Load configuration from defaults, user/global config, workspace config, and env overrides.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let env = EnvOverrides::from_env();
        let global = global_config_path();
        let workspace = WorkspaceSource::for_root(root, explicit);
        Self::load_with_layers(global, Some(workspace), env)
    }

    /// The built-in layout shipped with the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_str(&DEFAULT_CONFIG).context("embedded default layout is invalid")
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        workspace: Option<WorkspaceSource>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = vec![Self::builtin()?];

        if let Some(global_path) = global.filter(|path| path.exists()) {
            tracing::debug!(path = %global_path.display(), "loading global config");
            layers.push(Self::from_file(&global_path)?);
        }

        match workspace {
            Some(WorkspaceSource::Explicit(path)) => {
                if !path.exists() {
                    bail!("config file not found: {}", path.display());
                }
                layers.push(Self::from_file(&path)?);
            }
            Some(WorkspaceSource::Discovered(path)) if path.exists() => {
                tracing::debug!(path = %path.display(), "loading workspace config");
                layers.push(Self::from_file(&path)?);
            }
            _ => {}
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        Ok(apply_env_overrides(merged, env_overrides))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
            .with_context(|| format!("invalid config file: {}", path.display()))
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            project: Project {
                name: other.project.name.or(self.project.name),
            },
            layout: LayoutConfig {
                files: other.layout.files.or(self.layout.files),
            },
        }
    }
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("scaffold/config.toml"))
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(name) = env.project_name {
        config.project.name = Some(name);
    }
    config
}
