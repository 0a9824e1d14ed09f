//! Wayfinder chat binary: a console session against the trip planner.

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wayfinder::config::WayfinderConfig;
use wayfinder::planner::{SessionManager, TripPlanner, TripRequest};
use wayfinder::types::GenerationSettings;

#[derive(Parser)]
#[command(name = "wayfinder", about = "AI travel planning assistant")]
struct Cli {
    /// Model ID to use (overrides WAYFINDER_MODEL).
    #[arg(long)]
    model: Option<String>,

    /// Sampling temperature.
    #[arg(long)]
    temperature: Option<f64>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wayfinder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = WayfinderConfig::from_env();
    if let Some(model) = cli.model {
        config.set_model(model);
    }

    if !config.has_credentials() {
        eprintln!(
            "Error: OPENAI_API_KEY is required. Set it in the environment or a .env file."
        );
        std::process::exit(1);
    }

    let mut planner = match TripPlanner::from_config(&config) {
        Ok(planner) => planner,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    if let Some(temperature) = cli.temperature {
        planner = planner.with_settings(GenerationSettings {
            temperature: Some(temperature),
            ..Default::default()
        });
    }

    let mut sessions = SessionManager::new();
    let session_id = uuid::Uuid::new_v4().to_string();

    println!("Travel Planner: Hi! I'm your travel assistant. How can I help you plan your trip?");
    println!("You can ask about weather, events, or request an itinerary. Type 'quit' to exit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\nYou: ");
        use std::io::Write;
        let _ = std::io::stdout().flush();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                eprintln!("\nAn unexpected error occurred: {e}");
                break;
            }
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input.to_lowercase().as_str(), "quit" | "exit" | "bye") {
            println!("\nTravel Planner: Safe travels! Have a great trip!");
            break;
        }

        let session = sessions.get_or_create(&session_id);
        let result = planner
            .plan_trip(session, TripRequest::new(input))
            .await;

        match (result.data, result.error) {
            (Some(data), _) => println!("\nTravel Planner: {data}"),
            (_, Some(error)) => println!("\nSorry, I encountered an error: {error}"),
            _ => {}
        }
    }
}
