use std::sync::Arc;

use clap::Parser;

use tidings::app::AppContext;
use tidings::cli::{commands, Cli, Commands};
use tidings::config::Config;
use tidings::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command();

    if command == Commands::Tui {
        // An unwritable data dir only costs us the log file.
        if let Err(e) = logging::default_log_path().and_then(|p| logging::init_file_logging(&p)) {
            eprintln!("tidings: logging disabled: {}", e);
        }
    } else {
        logging::init_cli_logging();
    }

    let config = Config::load()?;
    let ctx = if cli.ephemeral {
        AppContext::in_memory(config, cli.lang)?
    } else {
        AppContext::new(config, cli.db.clone(), cli.lang)?
    };
    tracing::debug!("Starting {:?} in {}", command, ctx.language);

    match command {
        Commands::Tui => {
            tidings::tui::run(Arc::new(ctx)).await?;
        }
        Commands::List => {
            commands::list_news(&ctx).await?;
        }
        Commands::MarkRead { url } => {
            commands::mark_read(&ctx, &url)?;
        }
        Commands::ReadState => {
            commands::show_read_state(&ctx)?;
        }
    }

    Ok(())
}
