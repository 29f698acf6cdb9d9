//! Untweet CLI - Archive and delete old posts from a Twitter account.

use clap::Parser;
use untweet_cli::{logging, Cli, Formatter, Settings};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version are not failures; every usage error exits 1
            let code = if e.use_stderr() { 1 } else { 0 };
            e.print().ok();
            std::process::exit(code);
        }
    };

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> untweet_cli::Result<()> {
    // Settings are validated before any network or file activity
    let settings = Settings::load(&cli.config)?;
    let mode = cli.mode();
    let color = !cli.no_color;

    let _guard = logging::init(mode, &settings.settings.archive_path, color)?;

    let outcome = untweet_cli::execute(&settings, mode).inspect_err(|e| {
        tracing::error!("{}", e);
    })?;

    println!("{}", Formatter::new(color).outcome(&outcome));
    Ok(())
}
