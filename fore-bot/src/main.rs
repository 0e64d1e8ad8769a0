use anyhow::Result;
use clap::Parser;
use fore_core::broker::mock::MockBroker;
use fore_core::engine::SignalEngine;
use fore_core::ladder::TpLadderStore;
use fore_core::models::{InstrumentInfo, RuntimeConfig};
use fore_core::source::MessageSource;
use fore_core::trailing::TrailingDaemon;
use log::info;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

mod stdin_source;
use stdin_source::StdinSource;

#[derive(Parser, Debug)]
#[command(author, version, about = "Chat-signal driven pending-order bot")]
struct Args {
    /// Path of the persisted take-profit ladder file
    #[arg(long, default_value = "tp_ladders.json")]
    ladder_file: PathBuf,

    /// Trailing pass interval in seconds
    #[arg(long, default_value_t = 1)]
    trail_interval: u64,
}

/// Paper venue seeded with the default instrument so the whole pipeline can
/// run without a live session.
fn paper_broker(config: &RuntimeConfig) -> MockBroker {
    let symbol = config.default_symbol().to_string();
    let mut broker =
        MockBroker::new().with_instrument(InstrumentInfo::new(&symbol, 2, 0.01, 0.01, 0.01, 100.0));
    broker.set_quote(&symbol, 3400.0, 3400.3);
    broker
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = RuntimeConfig::from_env();
    info!(
        "starting fore-bot (default symbol {}, magic {})",
        config.default_symbol(),
        config.magic()
    );

    let broker = paper_broker(&config);
    let ladders = TpLadderStore::open(&args.ladder_file);
    info!("loaded {} persisted TP ladder(s)", ladders.len());

    let engine = Arc::new(Mutex::new(SignalEngine::new(
        Box::new(broker),
        ladders,
        config,
    )));

    let mut daemon = TrailingDaemon::new(engine.clone(), Duration::from_secs(args.trail_interval));
    daemon.start();

    let mut source = StdinSource::new();
    info!("waiting for signals on stdin (blank line ends a message)...");
    loop {
        let msg = match source.next_message().await {
            Ok(m) => m,
            Err(_) => break,
        };
        let reply = {
            let mut engine = engine.lock().unwrap();
            engine.handle_message(&msg.text, &msg.chat_id)
        };
        if let Some(text) = reply {
            source.reply(&text).await?;
        }
    }

    daemon.stop();
    info!("fore-bot shut down");
    Ok(())
}
