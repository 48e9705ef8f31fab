use clap::Parser;
use form_perception::cli::commands::{cmd_live, cmd_parse, cmd_replay};
use form_perception::cli::config::{Cli, Commands, load_config, log_level};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(log_level(cli.verbose))
        .parse_default_env()
        .init();

    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Parse { file } => cmd_parse(&file, &config)?,
        Commands::Replay { files } => cmd_replay(&files, &config, cli.verbose)?,
        Commands::Live { url, headed } => cmd_live(&url, headed, &config)?,
    }

    Ok(())
}
