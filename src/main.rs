use clap::Parser;
use tablero::cli::commands::Cli;
use tablero::cli::handlers;

fn main() {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        None => {
            // No subcommand → launch TUI
            if let Err(e) = tablero::tui::run() {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Some(_) => {
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
    }
}

/// Log to a file only when TABLERO_LOG names one; stderr would corrupt the
/// alternate screen.
fn init_tracing() {
    let Ok(path) = std::env::var("TABLERO_LOG") else {
        return;
    };
    let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
    else {
        return;
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tablero=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
}
