mod error;
mod handlers;
mod models;
mod router;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use router::create_router;
use state::AppState;
use token_feed::broadcast::SubscriberRegistry;
use token_feed::config::FeedConfig;
use token_feed::generator::SyntheticGenerator;
use token_feed::scheduler::MutationScheduler;
use token_feed::store::TokenStore;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    tracing::info!("starting token table gateway");

    let config = FeedConfig::default();
    let mut generator = match std::env::var("FEED_SEED")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
    {
        Some(seed) => {
            tracing::info!(seed, "using deterministic feed seed");
            SyntheticGenerator::seeded(config.clone(), seed)
        }
        None => SyntheticGenerator::from_entropy(config.clone()),
    };

    // Fatal if the generation capability errors at startup
    let store = Arc::new(TokenStore::initialize(&config, &mut generator)?);
    let registry = Arc::new(SubscriberRegistry::new(config.subscriber_queue_capacity));
    let scheduler = MutationScheduler::new(Arc::clone(&store), Arc::clone(&registry), &config);
    scheduler.start(generator);

    let state = AppState::new(store, Arc::clone(&registry));
    let app = create_router(state);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(3001);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Stop mutations first, then disconnect every live subscriber.
    // Both are idempotent, so this is safe after partial startup too.
    tracing::info!("shutting down");
    scheduler.stop().await;
    registry.shutdown();

    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for shutdown signal");
    }
}
