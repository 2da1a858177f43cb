mod app;
mod cli;

use clap::Parser;
use cli::{Cli, Command};
use relay_core::lifecycle::logging::{self, LogOutput};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => cmd_run(cli.run),
        Command::CheckConfig => cmd_check_config(&cli.run),
    }
}

fn cmd_run(args: cli::RunArgs) -> anyhow::Result<()> {
    let config = app::load_config(&args)?;

    let _guard = logging::init_logging(&args.log_level, &LogOutput::from_config(&config));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let application = app::Application::build(args, config);
        application.serve().await
    })
}

fn cmd_check_config(args: &cli::RunArgs) -> anyhow::Result<()> {
    let config = app::load_config(args)?;
    println!("Configuration OK: {}", app::describe(&config));
    if config.upstream.api_key().is_none() {
        println!("Warning: no upstream API key; every request will fail with 500.");
    }
    Ok(())
}
