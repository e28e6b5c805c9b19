use clap::Parser;
use codehack::errors::ErrorHandler;
use codehack::structs::cli::Cli;
use codehack::workers::command_runner::CommandRunner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    if let Err(error) = CommandRunner::new().run_command(cli.command).await {
        ErrorHandler::surface(&error);
        std::process::exit(1);
    }

    Ok(())
}
