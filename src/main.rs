use clap::Parser;
use solicita::config::Config;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod commands;

use cli::Cli;

fn init_logging() {
    // stdout is reserved for command output (and `--json`)
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    if commands::handle_status_commands(&cli)?
        || commands::handle_route_commands(&cli)?
        || commands::handle_format_commands(&cli)?
        || commands::handle_contract_commands(&cli)?
        || commands::handle_export_commands(&cli)?
    {
        return Ok(());
    }

    let config = Config::load()?.with_overrides(cli.cep_source.as_deref(), cli.timeout_ms);
    commands::handle_form_commands(&cli, &config)
}
