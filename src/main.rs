use clap::Parser as _;
use getpot_tree::cli::Args;
use getpot_tree::error::TreeError;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

fn main() {
    let args = Args::parse();

    // Logs go to stderr so command output on stdout stays clean
    let log_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    match getpot_tree::run(args) {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            error!("{:#}", err);
            std::process::exit(
                err.chain()
                    .find_map(|cause| cause.downcast_ref::<TreeError>())
                    .map_or(1, TreeError::exit_code),
            );
        }
    }
}
