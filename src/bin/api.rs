use air_buddy_assistant::{
    api::start_server,
    config::AssistantConfig,
    dispatcher::Dispatcher,
    notify::TracingAlertSink,
    prefs::{load_theme, FilePreferenceStore, PreferenceStore},
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = AssistantConfig::from_env()?;

    info!("Air-Buddy Assistant - API Server");
    info!("Port: {}", config.port);
    info!("Reply mode: {:?}", config.reply_mode);

    // Create components
    let preferences: Arc<dyn PreferenceStore> =
        Arc::new(FilePreferenceStore::open(&config.preferences_path)?);
    let theme = load_theme(preferences.as_ref()).await?;
    info!(theme = %theme, "Theme preference loaded");

    let strategy = config.build_strategy();
    let alerts = Arc::new(TracingAlertSink);
    let dispatcher = Arc::new(Dispatcher::new(strategy, alerts, config.reply_delay()));

    info!("Dispatcher initialized");
    info!("Starting API server...");

    // Start API server
    start_server(dispatcher, preferences, config.port).await?;

    Ok(())
}
