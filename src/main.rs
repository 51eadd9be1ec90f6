use std::sync::Arc;

use futures::StreamExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use truco_engine::application::engine::{MatchEngine, SeatController};
use truco_engine::domain::entities::Participant;
use truco_engine::domain::value_objects::MatchSettings;
use truco_engine::infrastructure::bot::strategies::{BalancedBot, RandomBot};
use truco_engine::infrastructure::io::{BroadcastLogger, EventHub};

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|value| value.parse().ok())
}

/// Exhibition match: the balanced heuristic against the random baseline,
/// narrated as a JSON event stream on stdout.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "truco_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut settings = MatchSettings::default();
    if let Some(seed) = env_parse("TRUCO_SEED") {
        settings.seed = Some(seed);
    }
    if let Some(target) = env_parse("TRUCO_TARGET_SCORE") {
        settings.target_score = target;
    }
    if let Some(pacing) = env_parse("TRUCO_PACING_MS") {
        settings.pacing_ms = pacing;
    }

    let hub = Arc::new(EventHub::new(1000));
    let mut events = Box::pin(hub.json_stream());
    tokio::spawn(async move {
        while let Some(json) = events.next().await {
            println!("{json}");
        }
    });

    let seed = settings.seed;
    let mut engine = MatchEngine::new(settings)?;
    engine.set_logger(Arc::new(BroadcastLogger::new(hub.clone(), engine.id())));
    engine.add_participant(
        Participant::scripted("Careca"),
        SeatController::Autonomous(Box::new(BalancedBot::new())),
    )?;
    engine.add_participant(
        Participant::scripted("Zé da Sorte"),
        SeatController::Autonomous(Box::new(match seed {
            Some(seed) => RandomBot::seeded(seed),
            None => RandomBot::new(),
        })),
    )?;

    tracing::info!("starting exhibition match {}", engine.id());
    let outcome = engine.run().await?;
    tracing::info!(
        "side {} wins {} x {} after {} hands",
        outcome.winning_side,
        outcome.scores[outcome.winning_side],
        outcome.scores[1 - outcome.winning_side],
        outcome.hands_played
    );

    Ok(())
}
