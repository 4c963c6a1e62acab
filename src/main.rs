use routedoc::{cli, env};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let config = match env::validate_environment() {
        Ok(config) => config,
        Err(errors) => {
            env::print_validation_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    // Logs go to stderr so generated documents can be piped from stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .with_writer(std::io::stderr)
        .init();
    config.log_notices();

    cli::parse_cli_commands(&config)
}
