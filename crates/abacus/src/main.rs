//! Abacus - entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;

use abacus::ConfigSource;

/// Command-line arguments.
struct Args {
    /// Path to configuration file.
    config: Option<PathBuf>,
}

enum Command {
    Run(Args),
    Help,
    Version,
}

impl Command {
    fn parse(mut args: impl Iterator<Item = String>) -> anyhow::Result<Self> {
        let mut config = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Self::Help),
                "--version" | "-V" => return Ok(Self::Version),
                other if other.starts_with('-') => {
                    anyhow::bail!("unknown option: {other} (use --help for usage)");
                }
                path if config.is_none() => config = Some(PathBuf::from(path)),
                extra => anyhow::bail!("unexpected argument: {extra}"),
            }
        }

        Ok(Self::Run(Args { config }))
    }
}

fn print_help() {
    println!(
        r"Abacus - HTTP arithmetic service

USAGE:
    abacus [CONFIG_PATH]

ARGS:
    [CONFIG_PATH]    Configuration file (TOML or JSON)

OPTIONS:
    -h, --help       Print help information
    -V, --version    Print version information

ENVIRONMENT VARIABLES:
    ABACUS_CONFIG                      Configuration file, if CONFIG_PATH is not given
    ABACUS__SERVER__HTTP_ADDR          Bind address (default: 0.0.0.0:8000)
    ABACUS__SERVER__MAX_BODY_BYTES     Request body limit (default: 1048576)
    ABACUS__LOGGING__LEVEL             Log filter (default: info)
    ABACUS__LOGGING__FORMAT            json or pretty (default: json)
    ABACUS__DOCS__ENABLED              Serve /openapi.json and /docs (default: true)

Without CONFIG_PATH or ABACUS_CONFIG, ./abacus.toml is used if it exists."
    );
}

async fn run(args: Args) -> anyhow::Result<()> {
    let source = ConfigSource::resolve(args.config);
    let config = abacus::load_config(&source)
        .with_context(|| format!("failed to load configuration from {source:?}"))?;

    abacus::telemetry::init_logging(&config.log_config())
        .context("failed to initialize logging")?;

    tracing::info!(
        version = abacus::VERSION,
        addr = %config.server.http_addr,
        docs = config.docs.enabled,
        "Starting Abacus"
    );

    let server = abacus::build_server(&config).context("failed to build server")?;
    server.run().await.context("server error")?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let command = match Command::parse(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    let args = match command {
        Command::Help => {
            print_help();
            return ExitCode::SUCCESS;
        }
        Command::Version => {
            println!("abacus {}", abacus::VERSION);
            return ExitCode::SUCCESS;
        }
        Command::Run(args) => args,
    };

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Logging may not be up yet.
            eprintln!("error: {e:#}");
            tracing::error!(error = %format!("{e:#}"), "Abacus stopped with an error");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<Command> {
        Command::parse(args.iter().map(ToString::to_string))
    }

    #[test]
    fn test_no_args() {
        assert!(matches!(parse(&[]), Ok(Command::Run(Args { config: None }))));
    }

    #[test]
    fn test_config_path() {
        match parse(&["abacus.json"]) {
            Ok(Command::Run(args)) => assert_eq!(args.config, Some(PathBuf::from("abacus.json"))),
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_flags() {
        assert!(matches!(parse(&["--help"]), Ok(Command::Help)));
        assert!(matches!(parse(&["-V"]), Ok(Command::Version)));
    }

    #[test]
    fn test_rejects_unknown_option_and_extra_args() {
        assert!(parse(&["--port", "80"]).is_err());
        assert!(parse(&["a.toml", "b.toml"]).is_err());
    }
}
