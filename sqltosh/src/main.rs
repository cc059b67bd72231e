use clap::Parser;
use colored::Colorize;
use sqltosh::{Catalog, Flow, RenderSettings, Shell, StatementBuffer};
use sqltosh_config::SqltoshConfig;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod completer;

/// sqltosh - browse the filesystem with SQL-flavored statements
#[derive(Parser, Debug)]
#[command(name = "sqltosh", version, about)]
struct Args {
    /// Configuration file (overrides the default search path)
    #[arg(short, long, env = "SQLTOSH_CONFIG")]
    config: Option<String>,

    /// Execute one statement and exit
    #[arg(short = 'e', long)]
    execute: Option<String>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match args.config.as_deref() {
        Some(path) => sqltosh_config::load_from_file(path),
        None => sqltosh_config::load(),
    }
    .unwrap_or_else(|e| {
        eprintln!("Warning: {e}; using default configuration");
        SqltoshConfig::default()
    });

    init_logging(&config);

    let color = config.display.color && !args.no_color;
    let mut shell = Shell::new(
        Catalog::new(),
        RenderSettings::new(color, &config.display.header_color),
    );

    if let Some(statement) = args.execute {
        let mut buffer = StatementBuffer::new();
        let terminated = if statement.trim_end().ends_with(';') {
            statement
        } else {
            format!("{statement};")
        };
        if let Some(statement) = buffer.push_line(&terminated) {
            shell.execute(&statement)?;
        }
        return Ok(());
    }

    run_repl(&mut shell, &config, color)
}

fn init_logging(config: &SqltoshConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.logging.directive()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn greet(color: bool) {
    let paint = |s: &str| {
        if color {
            s.magenta().bold().to_string()
        } else {
            s.to_string()
        }
    };

    println!();
    println!("Welcome to the sqltosh monitor. Commands end with {}.", paint(";"));
    println!(
        "Server version: {} SqltoSH Server (MIT)",
        paint(env!("CARGO_PKG_VERSION"))
    );
    println!();
    println!("Type 'help;' for help.");
    println!();
}

fn run_repl(
    shell: &mut Shell,
    config: &SqltoshConfig,
    color: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    use completer::SqltoshHelper;
    use rustyline::error::ReadlineError;
    use rustyline::{CompletionType, Config, Editor};

    let history = &config.shell.history;
    let rl_config = Config::builder()
        .completion_type(CompletionType::List)
        .max_history_size(history.max_entries.max(1))?
        .history_ignore_dups(true)?
        .history_ignore_space(true)
        .build();

    let mut rl = Editor::with_config(rl_config)?;
    rl.set_helper(Some(SqltoshHelper::new(shell.catalog().clone())));

    let history_path = history.enabled.then(|| expand_home(&history.file));
    if let Some(ref path) = history_path {
        if let Err(e) = rl.load_history(path) {
            tracing::debug!(path = %path.display(), error = %e, "no history loaded");
        }
    }

    greet(color);

    let mut buffer = StatementBuffer::new();
    loop {
        let prompt = if buffer.is_continuation() {
            &config.shell.continuation_prompt
        } else {
            &config.shell.prompt
        };

        match rl.readline(prompt) {
            Ok(line) => {
                let Some(statement) = buffer.push_line(&line) else {
                    continue;
                };

                if !statement.trim().is_empty() {
                    let _ = rl.add_history_entry(format!("{statement};"));
                }

                if shell.execute(&statement)? == Flow::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(err) => {
                eprintln!("Error: {err:?}");
                break;
            }
        }
    }

    if let Some(ref path) = history_path {
        if let Err(e) = rl.save_history(path) {
            tracing::warn!(path = %path.display(), error = %e, "failed to save history");
        }
    }

    println!("Goodbye.");
    Ok(())
}

fn expand_home(file: &str) -> PathBuf {
    match (file.strip_prefix("~/"), dirs::home_dir()) {
        (Some(stripped), Some(home)) => home.join(stripped),
        _ => PathBuf::from(file),
    }
}
