use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use console::Term;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use motodesk::cli::{self, Cli, OutputArg};
use motodesk::ConsoleNotifier;

fn main() -> Result<()> {
    let cli = Cli::parse();

    TermLogger::init(
        cli::log_level(cli.verbose),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("failed to initialize logging")?;

    let styled = match cli.output {
        OutputArg::Auto => Term::stderr().features().colors_supported(),
        OutputArg::Term => true,
        OutputArg::Text | OutputArg::Json => false,
    };
    let notifier = ConsoleNotifier::new(styled);

    cli::run(&cli, io::stdin().lock(), io::stdout().lock(), &notifier)?;
    Ok(())
}
