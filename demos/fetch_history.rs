// demos/fetch_history.rs
use std::env;
use wunderground_history::{FetchConfig, WeatherHistory, WeatherHistoryError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set RUST_LOG=info (or debug, trace) to see what the client is doing
    env_logger::init();

    // Usage: fetch_history [AIRPORT] [DATE]
    let mut args = env::args().skip(1);
    let location = args.next().unwrap_or_else(|| "KBOS".to_string());
    let date = args.next().unwrap_or_else(|| "2014-01-15".to_string());

    let config = FetchConfig::builder()
        .timeout(std::time::Duration::from_secs(15))
        .build();
    let history = WeatherHistory::with_config(config)?;

    println!("Fetching history for {} on {}", location, date);

    let outcome = history.fetch_outcome(&location, date.as_str()).await?;

    match &outcome.hourly {
        Ok(hourly) => {
            println!("{} hourly observations", hourly.len());
            for (hour, record) in hourly {
                println!(
                    "  {hour}:00  {:>6} °F  {}",
                    record
                        .temperature
                        .map(|t| format!("{t:.1}"))
                        .unwrap_or_else(|| "-".to_string()),
                    record.conditions.as_deref().unwrap_or("")
                );
            }
        }
        Err(e) => eprintln!("Hourly observations unavailable: {}", e),
    }

    match &outcome.daily {
        Ok(daily) => {
            println!("Daily summary:");
            for (key, value) in daily.iter() {
                println!("  {key:<20} {value}");
            }
        }
        Err(e) => eprintln!("Daily summary unavailable: {}", e),
    }

    // Exit with the first failure, if any, after printing what we have
    let report = outcome.into_report().inspect_err(|e: &WeatherHistoryError| {
        if let Some(cause) = e.pipeline() {
            eprintln!("Caused by: {}", cause);
        }
    })?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
