//! Tactile application binary - composition root.
//!
//! Ties the workspace crates together into a terminal front end:
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Initialize the tracing subscriber
//! 3. Spawn the domain event logger on a broadcast channel
//! 4. Run the selected subcommand loop over stdin

mod cli;
mod feedback;

use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;

use tactile_braille::{
    cell_mask, describe, haptic_pattern, transliterate, CheckOutcome, LessonEngine,
};
use tactile_core::config::TactileConfig;
use tactile_core::events::DomainEvent;
use tactile_core::types::Timestamp;
use tactile_voice::{ScriptedRecognizer, VoiceCommand, VoiceNavigator};

use cli::{CliArgs, Command};
use feedback::{ConsoleNarrator, LogMotor};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    let config_path = args.resolve_config_path();
    let config = TactileConfig::load_or_default(&config_path);

    let log_level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let (events_tx, events_rx) = broadcast::channel(64);
    tokio::spawn(event_logger(events_rx));

    let _ = events_tx.send(DomainEvent::ApplicationStarted {
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Timestamp::now(),
    });

    match args.command {
        Command::Encode { text } => run_encode(&text),
        Command::Practice { word } => {
            let word = word.unwrap_or_else(|| config.general.lesson_word.clone());
            run_practice(&word, &config, events_tx).await;
        }
        Command::Listen => run_listen(&config, events_tx).await,
    }
}

/// Log every domain event as structured JSON until all senders are gone.
async fn event_logger(mut rx: broadcast::Receiver<DomainEvent>) {
    loop {
        match rx.recv().await {
            Ok(event) => {
                let payload = serde_json::to_string(&event).unwrap_or_default();
                tracing::info!(event = event.event_name(), %payload, "Domain event");
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Event logger lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

/// Print cells, masks, spoken descriptions, and vibration patterns.
fn run_encode(text: &str) {
    for word in transliterate(text) {
        println!("word: {:?}", word.word);
        for cell in &word.characters {
            let mask: String = cell_mask(&cell.dots)
                .iter()
                .map(|&raised| if raised { 'o' } else { '.' })
                .collect();
            println!(
                "  {:?}  {}  {:<16}  buzz {:?}",
                cell.character,
                mask,
                describe(&cell.dots),
                haptic_pattern(&cell.dots)
            );
        }
    }
}

/// Interactive per-character practice loop.
///
/// Letter keys enter dots; `check`, `hear`, `back`, `clear`, and `quit`
/// drive the session.
async fn run_practice(
    word: &str,
    config: &TactileConfig,
    events: broadcast::Sender<DomainEvent>,
) {
    let narrator = Arc::new(ConsoleNarrator);
    let motor = Arc::new(LogMotor);
    let engine = LessonEngine::with_events(
        word,
        config.accessibility.clone(),
        narrator,
        motor,
        events,
    );

    println!("Practicing: {:?}", word);
    println!("Keys f d s j k l enter dots 1 2 3 4 5 6.");
    println!("Commands: check, hear, back, clear, quit.");
    engine.announce_current();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let input = line.trim().to_lowercase();
        match input.as_str() {
            "quit" => break,
            "hear" => engine.announce_current(),
            "back" => {
                engine.erase_dot();
                println!("pattern: {:?}", engine.input());
            }
            "clear" => {
                engine.clear_input();
                println!("pattern: {:?}", engine.input());
            }
            "check" => match engine.check() {
                Some(CheckOutcome::Correct) => {
                    if engine.is_complete() {
                        println!(
                            "Lesson complete. Score {}/{}",
                            engine.score(),
                            engine.total()
                        );
                        break;
                    }
                    let (word_at, word_count) = engine.word_progress();
                    println!("Progress: word {}/{}", word_at, word_count);
                    engine.announce_current();
                }
                Some(CheckOutcome::Incorrect) => {
                    println!("pattern: {:?}", engine.input());
                }
                None => break,
            },
            _ => {
                for key in input.chars() {
                    engine.press_key(key);
                }
                println!("pattern: {:?}", engine.input());
            }
        }
    }
}

/// Read stdin lines as finalized transcripts and dispatch them.
async fn run_listen(config: &TactileConfig, events: broadcast::Sender<DomainEvent>) {
    let narrator = Arc::new(ConsoleNarrator);
    let recognizer = ScriptedRecognizer::new();
    let navigator = VoiceNavigator::with_events(
        navigation_commands(),
        Some(Box::new(recognizer)),
        narrator,
        config.accessibility.clone(),
        events,
    );

    navigator.start_listening();
    if !config.accessibility.voice_navigation_enabled {
        println!("Enable accessibility.voice_navigation_enabled in the config to listen.");
        return;
    }
    navigator.handle_recognizer_started();
    println!("Type an utterance per line; 'quit' to stop.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        if line == "quit" {
            break;
        }
        navigator.handle_transcript(line, true);
    }

    navigator.stop_listening();
    navigator.handle_recognizer_ended();
}

/// The built-in navigation command table. Longer phrases come first so
/// they are not shadowed by their prefixes.
fn navigation_commands() -> Vec<VoiceCommand> {
    vec![
        VoiceCommand::new(
            "sign language",
            "sign language studio",
            Box::new(|| println!("-> /learning/sign-language")),
        ),
        VoiceCommand::new(
            "braille",
            "braille lesson",
            Box::new(|| println!("-> /learning/braille")),
        ),
        VoiceCommand::new(
            "courses",
            "course catalog",
            Box::new(|| println!("-> /courses")),
        ),
        VoiceCommand::new(
            "dashboard",
            "dashboard",
            Box::new(|| println!("-> /dashboard")),
        ),
        VoiceCommand::new("home", "home page", Box::new(|| println!("-> /"))),
    ]
}
