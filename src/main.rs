//! Characterology chat CLI.
//!
//! Composition root: loads configuration, initializes logging and metrics,
//! wires the breaker registry, the LLM client and the chat engine, then
//! answers questions one-shot or in an interactive loop.

use std::path::PathBuf;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use characterology_chat::chat::ChatEngine;
use characterology_chat::config::{load_config, AppConfig};
use characterology_chat::fallback::UserLevel;
use characterology_chat::llm::OpenAiChatClient;
use characterology_chat::observability::{logging, metrics};
use characterology_chat::resilience::{BreakerRegistry, CircuitState, LLM_BREAKER};

#[derive(Parser)]
#[command(name = "characterology-chat")]
#[command(about = "Characterology chatbot with retry, circuit breaking and fallback", long_about = None)]
struct Cli {
    /// Path to a TOML config file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Answer a single question and exit.
    #[arg(short, long)]
    question: Option<String>,

    /// Expertise level steering the degraded-mode tips.
    #[arg(long, default_value = "beginner", value_parser = parse_level)]
    level: UserLevel,
}

fn parse_level(value: &str) -> Result<UserLevel, String> {
    match value {
        "beginner" => Ok(UserLevel::Beginner),
        "intermediate" => Ok(UserLevel::Intermediate),
        "advanced" => Ok(UserLevel::Advanced),
        other => Err(format!("unknown level '{other}' (beginner|intermediate|advanced)")),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    logging::init(&config.observability.log_level);
    tracing::info!("characterology-chat v0.1.0 starting");
    tracing::info!(
        model = %config.llm.model,
        max_retries = config.resilience.max_retries,
        failure_threshold = config.resilience.failure_threshold,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let api_key = std::env::var(&config.llm.api_key_env).unwrap_or_else(|_| {
        tracing::warn!(
            env = %config.llm.api_key_env,
            "API key env var not set; provider calls will be rejected"
        );
        String::new()
    });

    let registry = BreakerRegistry::new();
    let breaker = registry.get_or_create(LLM_BREAKER, config.resilience.breaker_settings());
    let client = OpenAiChatClient::new(&config.llm, api_key)?;
    let engine = ChatEngine::new(client, breaker, config.resilience.retry_policy());

    if let Some(question) = cli.question {
        let answer = engine.ask(&question, cli.level).await;
        if let Some(status_line) = &answer.status_line {
            println!("{status_line}\n");
        }
        println!("{}", answer.text);
        return Ok(());
    }

    run_interactive(&registry, &engine, cli.level).await
}

async fn run_interactive<C: characterology_chat::llm::ChatClient>(
    registry: &BreakerRegistry,
    engine: &ChatEngine<C>,
    level: UserLevel,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Posez vos questions sur la caractérologie. Commandes : /status, /reset, /quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        match input {
            "" => continue,
            "/quit" => break,
            "/status" => {
                let snapshots = registry.snapshots();
                let degraded = snapshots.iter().any(|s| s.state != CircuitState::Closed);
                for snapshot in &snapshots {
                    println!(
                        "{} — {} (échecs: {}/{}, succès: {})",
                        snapshot.name,
                        engine.fallback().service_status_message(snapshot),
                        snapshot.failure_count,
                        snapshot.failure_threshold,
                        snapshot.success_count,
                    );
                }
                if degraded {
                    println!("\n{}", engine.fallback().offline_guidance());
                }
            }
            "/reset" => {
                engine.breaker().reset();
                println!("Disjoncteur réarmé.");
            }
            question => {
                let answer = engine.ask(question, level).await;
                if let Some(status_line) = &answer.status_line {
                    println!("{status_line}\n");
                }
                println!("{}\n", answer.text);
            }
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
