use clap::Parser;
use tracing::debug;

use utility_cli::cli::{orchestration, Cli};
use utility_cli::{logging, ui};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Credentials and region may come from a local .env file.
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    if let Ok(path) = dotenv {
        debug!(path = %path.display(), "loaded environment file");
    }

    if let Err(e) = orchestration::dispatch(cli).await {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
