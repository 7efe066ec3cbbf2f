//! Solace CLI
//!
//! Usage:
//!   solace --text "your text here"           # Single turn
//!   solace --interactive                     # Conversation over stdin
//!   solace --serve                           # HTTP API server
//!   solace --text "text" --json              # JSON output

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use solace::config::SolaceConfig;
use solace::core::{run_server, InMemoryStore, RandomPicker, TurnOrchestrator};
use solace::types::GeneratedResponse;
use solace::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "solace",
    version = VERSION,
    about = "Solace - Emotion- and risk-aware replies for support chat",
    long_about = "Solace classifies each message for emotion and crisis risk,\n\
                  picks a response strategy and renders a pre-approved reply\n\
                  with suggested next steps.\n\n\
                  Modes:\n  \
                  --text         Single turn\n  \
                  --interactive  Conversation over stdin\n  \
                  --serve        HTTP API server mode\n\n\
                  Strategies:\n  \
                  CRISIS         - Severe or critical risk, always wins\n  \
                  SUPPORTIVE     - Sadness or pessimism\n  \
                  THERAPEUTIC    - Anger\n  \
                  CONVERSATIONAL - Everything else"
)]
struct Args {
    /// Text to process (single mode)
    #[arg(short, long)]
    text: Option<String>,

    /// Interactive mode - read lines from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (default: 127.0.0.1:3000)
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// User id for CLI turns
    #[arg(short, long, default_value = "local")]
    user: String,

    /// Locale code (unsupported codes use the default locale)
    #[arg(short, long)]
    locale: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Seed template selection for reproducible replies
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("solace=info")),
        )
        .init();

    let args = Args::parse();
    let orchestrator = build_orchestrator(&args)?;

    if args.serve {
        run_server(&args.addr, Arc::new(orchestrator)).await
    } else if let Some(ref text) = args.text {
        run_single(&orchestrator, text, &args).await
    } else {
        // Default to interactive if no mode specified
        run_interactive(&orchestrator, &args).await
    }
}

fn build_orchestrator(args: &Args) -> anyhow::Result<TurnOrchestrator> {
    let config = match args.config {
        Some(ref path) => SolaceConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SolaceConfig::default(),
    };

    let store = Arc::new(InMemoryStore::from_config(&config));
    let orchestrator = TurnOrchestrator::new(config, store).context("invalid configuration")?;

    Ok(match args.seed {
        Some(seed) => orchestrator.with_picker(RandomPicker::seeded(seed)),
        None => orchestrator,
    })
}

fn requested_locale(orchestrator: &TurnOrchestrator, args: &Args) -> String {
    args.locale
        .clone()
        .unwrap_or_else(|| orchestrator.locales().default_locale().code().to_string())
}

/// Run single turn
async fn run_single(orchestrator: &TurnOrchestrator, text: &str, args: &Args) -> anyhow::Result<()> {
    let limit = orchestrator.config().max_input_bytes;
    anyhow::ensure!(text.len() <= limit, "text exceeds {} bytes", limit);

    let locale = requested_locale(orchestrator, args);
    let response = orchestrator.process_turn(&args.user, text, &locale).await;
    print_response(&response, args)
}

/// Run interactive mode
async fn run_interactive(orchestrator: &TurnOrchestrator, args: &Args) -> anyhow::Result<()> {
    let locale = requested_locale(orchestrator, args);

    print_header(args.no_color);
    println!("Type a message and press Enter. Type 'quit' to exit.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut turns = 0usize;

    loop {
        print!("{}", if args.no_color { "> " } else { "\x1b[1m>\x1b[0m " });
        stdout.flush()?;

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }
        if line.is_empty() {
            continue;
        }
        if line.len() > orchestrator.config().max_input_bytes {
            eprintln!("Message too long (limit {} bytes)", orchestrator.config().max_input_bytes);
            continue;
        }

        let response = orchestrator.process_turn(&args.user, line, &locale).await;
        print_response(&response, args)?;
        turns += 1;
    }

    println!("\nSession ended. Turns: {}", turns);
    Ok(())
}

fn print_response(response: &GeneratedResponse, args: &Args) -> anyhow::Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(response)?);
    } else if args.no_color {
        println!("{}", response.to_parseable_string());
    } else {
        println!("{}", response.to_terminal_string());
    }
    Ok(())
}

/// Print header
fn print_header(no_color: bool) {
    if no_color {
        println!("========================================");
        println!("  Solace v{}", VERSION);
        println!("========================================");
    } else {
        println!("\x1b[1m========================================\x1b[0m");
        println!("\x1b[1m  Solace v{}\x1b[0m", VERSION);
        println!("\x1b[1m========================================\x1b[0m");
    }
    println!();
}
