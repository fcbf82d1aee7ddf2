use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = scaffold::cli::Cli::parse();
    scaffold::init(cli.quiet)?;

    cli.run()
}
