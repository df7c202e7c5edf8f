//! Stockholm Direkt CLI
//!
//! Command-line interface for querying a running server.

#![allow(clippy::print_stdout)]

use clap::Parser;
use domain::{GeoLocation, haversine_distance_m};
use presentation_cli::{ApiClient, Cli, CliError, Commands, log_filter_from_verbosity};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(log_filter_from_verbosity(
            cli.verbose,
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Commands::Distance {
        lat1,
        lon1,
        lat2,
        lon2,
    } = cli.command
    {
        let a = GeoLocation::new(lat1, lon1)
            .map_err(|e| anyhow::anyhow!("First position: {e}"))?;
        let b = GeoLocation::new(lat2, lon2)
            .map_err(|e| anyhow::anyhow!("Second position: {e}"))?;
        let meters = haversine_distance_m(&a, &b);
        println!("📏 {meters:.0} m ({:.2} km)", meters / 1000.0);
        return Ok(());
    }

    let client = ApiClient::new(&cli.url)?;

    let result = match cli.command {
        Commands::Status => {
            let resp = client.status().await?;
            println!("📊 Server Status:");
            println!("{}", serde_json::to_string_pretty(&resp)?);
            return Ok(());
        },
        Commands::Search { query } => client.search(&query).await.map(|resp| print_search(&resp)),
        Commands::Nearby { lat, lon, radius } => client
            .nearby(lat, lon, radius)
            .await
            .map(|resp| print_stops("📍 Nearby stops:", &resp["stops"])),
        Commands::Resolve { name } => client.resolve(&name).await.map(|resp| {
            println!(
                "🔎 {} → {}",
                resp["name"].as_str().unwrap_or(&name),
                resp["stop_id"].as_str().unwrap_or("?")
            );
        }),
        Commands::Trips {
            destination,
            lat,
            lon,
        } => client
            .trips(&destination, lat, lon)
            .await
            .map(|resp| print_trips(&destination, &resp)),
        Commands::Contact {
            name,
            email,
            message,
        } => client
            .contact(&name, &email, &message)
            .await
            .map(|resp| {
                println!(
                    "✅ {} (id: {})",
                    resp["message"].as_str().unwrap_or("Skickat"),
                    resp["id"].as_str().unwrap_or("?")
                );
            }),
        Commands::Distance { .. } => Ok(()),
    };

    match result {
        Ok(()) => Ok(()),
        Err(CliError::Api {
            message,
            suggestions,
            ..
        }) => {
            println!("❌ {message}");
            if !suggestions.is_empty() {
                println!("💡 Prova: {}", suggestions.join(", "));
            }
            std::process::exit(1);
        },
        Err(e) => Err(e.into()),
    }
}

fn print_search(resp: &Value) {
    println!(
        "🔎 {} träffar för \"{}\" ({}):",
        resp["total"],
        resp["query"].as_str().unwrap_or_default(),
        resp["strategy"].as_str().unwrap_or_default()
    );
    print_stops("", &resp["candidates"]);
}

fn print_stops(heading: &str, stops: &Value) {
    if !heading.is_empty() {
        println!("{heading}");
    }
    for stop in stops.as_array().into_iter().flatten() {
        let distance = stop["distance_meters"]
            .as_u64()
            .map(|m| format!(" ({m} m)"))
            .unwrap_or_default();
        println!(
            "   • {} [{}]{distance}",
            stop["name"].as_str().unwrap_or("?"),
            stop["id"].as_str().unwrap_or("?")
        );
    }
}

fn print_trips(destination: &str, resp: &Value) {
    let trips = resp["trips"].as_array().map(Vec::as_slice).unwrap_or_default();
    if trips.is_empty() {
        println!("🚫 Inga resor hittades till {destination}");
        return;
    }

    println!("🚇 Resor till {destination}:");
    for trip in trips {
        println!("   {}", trip["summary"].as_str().unwrap_or("?"));
    }
}
