pub mod app;
pub mod cli;
pub mod domain;
pub mod infra;

pub fn init(quiet: bool) -> anyhow::Result<()> {
    infra::logging::init(quiet)
}
