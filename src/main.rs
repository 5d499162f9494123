use boom_bot::cli::{print_config, Cli, Commands};
use boom_bot::config::Config;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Defaults <- config file <- .env / environment
    let config = Config::resolve(&cli.config)?;

    // Initialize telemetry
    boom_bot::telemetry::init_telemetry(&config.telemetry)?;

    config.validate()?;

    match cli.command {
        Commands::Run(args) => {
            args.execute(&config).await?;
        }
        Commands::Scan(args) => {
            tracing::info!(dry_run = args.dry_run, "Running single scan");
            args.execute(&config).await?;
        }
        Commands::Score(args) => {
            args.execute(&config).await?;
        }
        Commands::Config => {
            print_config(&config);
        }
    }

    Ok(())
}
