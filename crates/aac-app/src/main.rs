//! Hanmadi Board - Main Entry Point
//!
//! Runs the board in a terminal: one command per line on stdin, highlights
//! and speech printed to stdout, auto-advance driven by timers.

use aac_app::{AppConfig, Command, ConsoleNavigator, ConsoleSpeech, Session};
use aac_board::FileStorage;
use aac_scan::{MonotonicClock, ScanEvent};
use smol::io::{AsyncBufReadExt, BufReader};
use smol::stream::StreamExt;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Wake-up interval while no timer is pending
const IDLE_WAKE: Duration = Duration::from_secs(60);

enum Wake {
    Line(Option<std::io::Result<String>>),
    Timer,
}

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_args(std::env::args().skip(1));

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.default_log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting Hanmadi Board {}...", aac_app::VERSION);
    tracing::info!("Data directory: {}", config.data_dir.display());

    smol::block_on(run(config))
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    let clock = MonotonicClock::new();
    let mut session = Session::new(FileStorage::new(&config.data_dir))
        .with_clock(clock)
        .with_navigator(ConsoleNavigator::default())
        .with_speech(ConsoleSpeech::default());

    println!("n: next  s: select  b: back  d/u: switch down/up  speak  h: history  q: quit");
    if config.scan_on_start {
        session.start_scanning();
    }

    let mut lines = BufReader::new(smol::Unblock::new(std::io::stdin())).lines();
    loop {
        let wake_at = session
            .next_deadline()
            .map(|ms| clock.instant_at(ms))
            .unwrap_or_else(|| Instant::now() + IDLE_WAKE);

        let wake = smol::future::or(async { Wake::Line(lines.next().await) }, async {
            smol::Timer::at(wake_at).await;
            Wake::Timer
        })
        .await;

        let events = match wake {
            Wake::Timer => session.poll(),
            Wake::Line(None) => break,
            Wake::Line(Some(line)) => {
                let line = line?;
                let Some(command) = Command::parse(&line) else {
                    println!("unknown command: {}", line.trim());
                    continue;
                };
                match command {
                    Command::Quit => break,
                    Command::Key(key) => session.handle_key(key),
                    Command::Action(action) => session.perform(action),
                    Command::SwitchDown => session.switch_down(),
                    Command::SwitchUp => session.switch_up(),
                    Command::Start => {
                        session.start_scanning();
                        Vec::new()
                    }
                    Command::Stop => {
                        session.stop_scanning();
                        Vec::new()
                    }
                    Command::Restart => {
                        session.restart_scanning();
                        Vec::new()
                    }
                    Command::Speak => {
                        if session.speak_message().is_none() {
                            println!("(nothing selected)");
                        }
                        Vec::new()
                    }
                    Command::History => {
                        for (i, message) in session.history().iter().enumerate() {
                            println!("{:>3}. {}", i + 1, message);
                        }
                        Vec::new()
                    }
                }
            }
        };

        for event in events {
            if let ScanEvent::AutoReturned { from, to } = event {
                println!("[auto] {:?} -> {:?}", from, to);
            }
        }
    }

    session.close();
    tracing::info!("Bye");
    Ok(())
}
