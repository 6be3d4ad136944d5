//! Finchat Terminal Client
//!
//! Thin renderer over the finchat session core. The terminal's job is:
//! 1. Bring the backend online (status probe, then initialize if needed)
//! 2. Read questions from stdin
//! 3. Print answers and their sources
//!
//! All session logic lives in `finchat-core`; this binary only renders.
//!
//! # Usage
//!
//! ```bash
//! # Talk to a backend on localhost:5000
//! finchat
//!
//! # Custom backend
//! finchat --host rag.internal --port 8080
//!
//! # One-shot question
//! finchat --question "Which stock gained the most this month?"
//!
//! # With verbose logging
//! RUST_LOG=debug finchat
//! ```

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

use finchat_core::{
    AssetKind, ClientConfig, ErrorKind, HttpBackend, SessionController, SessionEvent, Source, Turn,
};

/// Terminal client for a finance question-answering backend
#[derive(Debug, Parser)]
#[command(name = "finchat", version, about)]
struct Args {
    /// Backend host
    #[arg(long, env = "FINCHAT_HOST")]
    host: Option<String>,

    /// Backend port
    #[arg(long, env = "FINCHAT_PORT")]
    port: Option<u16>,

    /// Ask a single question and exit
    #[arg(long, short)]
    question: Option<String>,

    /// Skip the startup readiness probe and initialize unconditionally
    #[arg(long)]
    skip_probe: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("finchat=info".parse()?)
                .add_directive("finchat_core=info".parse()?),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    let mut config = ClientConfig::from_env();
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if args.skip_probe {
        config.probe_on_start = false;
    }

    println!("finchat — connected to {}", config.base_url());

    let (tx, mut rx) = mpsc::channel(100);
    let backend = HttpBackend::from_config(&config);
    let controller = SessionController::new(backend, tx);

    bring_online(&controller, &config, &mut rx).await?;

    if let Some(question) = args.question {
        ask_and_render(&controller, &question, &mut rx).await;
        return Ok(());
    }

    render_sample_questions(&controller).await;

    println!("Type a question, or \"quit\" to leave.\n");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print_prompt();
        let Some(line) = lines.next_line().await.context("reading stdin")? else {
            break;
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }
        ask_and_render(&controller, &line, &mut rx).await;
    }

    println!("Goodbye!");
    Ok(())
}

/// Probe backend readiness and initialize if it isn't ready yet
async fn bring_online(
    controller: &SessionController<HttpBackend>,
    config: &ClientConfig,
    rx: &mut mpsc::Receiver<SessionEvent>,
) -> anyhow::Result<()> {
    if config.probe_on_start {
        match controller.check_status().await {
            Ok(true) => {
                println!("Backend is ready.\n");
                drain_events(rx);
                return Ok(());
            }
            Ok(false) => debug!("Backend not initialized yet"),
            Err(kind) => {
                anyhow::bail!("could not reach backend at {}: {kind}", config.base_url())
            }
        }
    }

    println!("Initializing backend (this loads market data and may take a while)...");
    controller
        .initialize()
        .await
        .map_err(|kind| anyhow::anyhow!("initialization failed: {kind}"))?;
    println!("Backend initialized.\n");
    drain_events(rx);
    Ok(())
}

/// Ask one question and print the outcome
async fn ask_and_render(
    controller: &SessionController<HttpBackend>,
    question: &str,
    rx: &mut mpsc::Receiver<SessionEvent>,
) {
    match controller.ask(question).await {
        Ok(turn) => render_answer(&turn),
        Err(ErrorKind::EmptyInput) => println!("Please type a question."),
        Err(ErrorKind::NotReady) => println!("The backend is not ready yet — try again shortly."),
        Err(ErrorKind::Busy) => println!("Still waiting on the previous question."),
        Err(kind) => println!("Sorry, something went wrong: {kind}"),
    }
    drain_events(rx);
}

/// Print an assistant turn with its sources
fn render_answer(turn: &Turn) {
    println!("\n{}", turn.content);

    if !turn.sources.is_empty() {
        println!("\nSources ({}):", turn.sources.len());
        for source in &turn.sources {
            println!("  - {}", format_source(source));
        }
    }

    println!("  [{}]\n", format_timestamp(turn.occurred_at));
}

/// Format one source line, e.g. `Stock: AAPL (3.00%)` or `Crypto: bitcoin`
fn format_source(source: &Source) -> String {
    let label = match source.kind {
        AssetKind::Equity => "Stock",
        AssetKind::Crypto => "Crypto",
    };
    match source.price_change_pct {
        Some(pct) => format!("{label}: {} ({pct:.2}%)", source.symbol),
        None => format!("{label}: {}", source.symbol),
    }
}

/// Render a Unix-ms timestamp as a local clock time
fn format_timestamp(ms: u64) -> String {
    chrono::DateTime::from_timestamp_millis(ms as i64)
        .map(|dt| {
            dt.with_timezone(&chrono::Local)
                .format("%H:%M:%S")
                .to_string()
        })
        .unwrap_or_default()
}

/// Fetch and print the backend's suggested questions (non-critical)
async fn render_sample_questions(controller: &SessionController<HttpBackend>) {
    match controller.sample_questions().await {
        Ok(questions) if !questions.is_empty() => {
            println!("Some things you can ask:");
            for question in questions {
                println!("  - {question}");
            }
            println!();
        }
        Ok(_) => {}
        Err(kind) => debug!(error = %kind, "Sample questions unavailable"),
    }
}

/// Drain pending session events; state changes are logged, the rest is
/// already rendered from the operation results
fn drain_events(rx: &mut mpsc::Receiver<SessionEvent>) {
    while let Ok(event) = rx.try_recv() {
        if let SessionEvent::State { state } = event {
            debug!(state = state.description(), "Session state changed");
        }
    }
}

fn print_prompt() {
    use std::io::Write;
    print!("> ");
    let _ = std::io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_source() {
        assert_eq!(
            format_source(&Source::equity("AAPL", Some(3.0))),
            "Stock: AAPL (3.00%)"
        );
        assert_eq!(
            format_source(&Source::crypto("bitcoin", None)),
            "Crypto: bitcoin"
        );
    }

    #[test]
    fn test_format_timestamp_handles_garbage() {
        // Out-of-range values render as an empty string rather than panicking
        assert_eq!(format_timestamp(u64::MAX), "");
    }
}
