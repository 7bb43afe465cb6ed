use clap::Parser;
use svgpdf_launcher::cli::{self, Cli};
use tracing::{debug, error, trace};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli::init_logging(cli.verbose) {
        eprintln!("Warning: {e}");
    }

    debug!("Launcher started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    let code = match cli::run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("Fatal error: {:#}", e);
            eprintln!("Error: {e:#}");
            1
        }
    };

    std::process::exit(code);
}
