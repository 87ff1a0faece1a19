use air_buddy_assistant::{
    config::AssistantConfig,
    dispatcher::Dispatcher,
    models::{BreakdownEntry, Expenses, FinancialSnapshot, Profit, Revenue},
    notify::TracingAlertSink,
    prefs::{load_theme, InMemoryPreferenceStore},
};
use std::sync::Arc;
use tracing::info;

fn sample_snapshot() -> FinancialSnapshot {
    FinancialSnapshot {
        revenue: Revenue {
            total: 5_000_000.0,
            aeronautical: 2_000_000.0,
            non_aeronautical: 3_000_000.0,
            breakdown: vec![
                BreakdownEntry {
                    name: "Landing Fees".to_string(),
                    amount: 1_200_000.0,
                },
                BreakdownEntry {
                    name: "Passenger Charges".to_string(),
                    amount: 800_000.0,
                },
                BreakdownEntry {
                    name: "Retail".to_string(),
                    amount: 1_800_000.0,
                },
                BreakdownEntry {
                    name: "Parking".to_string(),
                    amount: 1_200_000.0,
                },
            ],
        },
        expenses: Expenses {
            total: 3_750_000.0,
            breakdown: vec![
                BreakdownEntry {
                    name: "Infrastructure".to_string(),
                    amount: 1_400_000.0,
                },
                BreakdownEntry {
                    name: "Operations".to_string(),
                    amount: 800_000.0,
                },
                BreakdownEntry {
                    name: "Security".to_string(),
                    amount: 450_000.0,
                },
                BreakdownEntry {
                    name: "Salaries".to_string(),
                    amount: 1_100_000.0,
                },
            ],
        },
        profit: Profit {
            total: 1_250_000.0,
            margin: 25.0,
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("Air-Buddy assistant demo starting");

    let config = AssistantConfig::from_env()?;
    let preferences = InMemoryPreferenceStore::new();
    let theme = load_theme(&preferences).await?;
    info!(theme = %theme, "Theme preference loaded");

    // Create components
    let strategy = config.build_strategy();
    let alerts = Arc::new(TracingAlertSink);
    let dispatcher = Dispatcher::new(strategy, alerts, config.reply_delay());

    dispatcher.set_snapshot(sample_snapshot()).await;

    let queries = [
        "Hello!",
        "What is our profit?",
        "Tell me the revenue breakdown",
        "How is the weather?",
        "Search for a flight to London",
    ];

    for query in queries {
        info!(query = %query, "Sending message");
        dispatcher.send(query).await;
        dispatcher.wait_until_idle().await;
    }

    println!("\n=== CONVERSATION ===");
    for turn in dispatcher.transcript().await {
        println!("[{}] {}", turn.sender, turn.text);
    }

    Ok(())
}
