//! Command-line interface.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::app::layout::LayoutRenderer;
use crate::app::scaffold::Scaffolder;
use crate::domain::model::{Layout, ScaffoldReport};
use crate::infra::config::Config;

#[derive(Debug, Parser)]
#[command(author, version, about = "Create a project skeleton of empty files", long_about = None)]
pub struct Cli {
    /// Directory the layout is created under (defaults to the current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,
    /// Layout file to use instead of `<root>/scaffold.toml`
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Value substituted for `{{ project_name }}` in layout entries
    #[arg(long, global = true)]
    pub project_name: Option<String>,
    /// Report what would be created without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,
    /// Only log warnings and errors
    #[arg(long, short)]
    pub quiet: bool,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the resolved layout, one path per line
    Layout,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Execute the parsed command.
    pub fn run(self) -> Result<()> {
        match self.command {
            Some(Commands::Completions { shell }) => {
                let mut cmd = Cli::command();
                let name = cmd.get_name().to_owned();
                clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
                Ok(())
            }
            Some(Commands::Layout) => {
                let layout = self.resolve_layout()?;
                for entry in layout.entries() {
                    println!("{entry}");
                }
                Ok(())
            }
            None => {
                self.scaffold()?;
                Ok(())
            }
        }
    }

    fn scaffold(&self) -> Result<ScaffoldReport> {
        let layout = self.resolve_layout()?;
        Scaffolder::new(self.project_root()?)
            .dry_run(self.dry_run)
            .ensure_scaffold(layout.entries())
    }

    fn resolve_layout(&self) -> Result<Layout> {
        let root = self.project_root()?;
        let mut config = Config::load(&root, self.config.as_deref())?;
        if let Some(name) = &self.project_name {
            config.project.name = Some(name.clone());
        }
        LayoutRenderer::new().render(&config)
    }

    fn project_root(&self) -> Result<PathBuf> {
        match &self.root {
            Some(root) => Ok(root.clone()),
            None => std::env::current_dir().context("failed to resolve current directory"),
        }
    }
}
