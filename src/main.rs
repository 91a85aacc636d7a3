use color_eyre::Result;
use std::io;

use mentorlink::cli::{self, parse_args, CliCommand, CommandFailure, USAGE};
use mentorlink::notifications::Notice;
use mentorlink::startup::{init_tracing, ClientConfig, Context};

fn report(failure: &CommandFailure) -> io::Result<()> {
    failure.report(&mut io::stderr())
}

fn main() -> Result<()> {
    let command = parse_args(std::env::args());

    // Local commands run before any initialization
    match &command {
        CliCommand::Version => {
            println!("{}", cli::version::version_line());
            return Ok(());
        }
        CliCommand::Help => {
            print!("{}", USAGE);
            return Ok(());
        }
        CliCommand::Usage(message) => {
            report(&CommandFailure {
                notice: Notice::error(message.clone()),
                source: None,
                show_usage: true,
            })?;
            std::process::exit(1);
        }
        _ => {}
    }

    color_eyre::install()?;

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    init_tracing(&config.log_filter);

    let runtime = tokio::runtime::Runtime::new()?;
    let outcome = runtime.block_on(async {
        let mut ctx = Context::from_config(&config)
            .await
            .map_err(|e| CommandFailure {
                notice: Notice::error(e.user_message()),
                source: Some(e),
                show_usage: false,
            })?;
        cli::run(command, &mut ctx, &mut io::stdout()).await
    });

    if let Err(failure) = outcome {
        report(&failure)?;
        std::process::exit(failure.exit_code());
    }
    Ok(())
}
