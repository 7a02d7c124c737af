mod cmd;
mod output;
mod repl;
mod session;

use anyhow::Context;
use clap::Parser;
use recipe_core::config::Config;
use session::Session;
use std::path::Path;

#[derive(Parser)]
#[command(
    name = "rcp",
    about = "Interactive recipe editor with a small file-navigation shell",
    version
)]
struct Cli {
    /// Script file to run, or a command to interpret directly
    args: Vec<String>,

    /// Disable colored output
    #[arg(short = 'b', long = "no-color")]
    no_color: bool,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let (config, warning) = Config::discover(&cwd);
    if let Some(warning) = warning {
        output::warn(&warning);
    }
    output::init(config.color && !cli.no_color);

    let mut session = Session::new();

    match cli.args.first() {
        Some(first) if Path::new(first).is_file() => {
            tracing::info!(script = %first, "running script");
            repl::run_script(&mut session, Path::new(first))
        }
        Some(_) => {
            // Not a script file: treat the arguments as one command.
            let line = cli.args.join(" ");
            session.interpret(&line, &mut repl::DenyPrompter);
            Ok(())
        }
        None => repl::run(&mut session),
    }
}
