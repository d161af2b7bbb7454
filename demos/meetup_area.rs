//! Resolve the meeting area for two postcodes against the live postcodes service.
//!
//! ```sh
//! cargo run --example meetup_area -- "SW1A 1AA" "E1 1HJ"
//! ```
//!
//! Set `TAVILY_API_KEY` to also search for food and activities in the area.

use std::process::ExitCode;

use meetup_planner::agent::MeetupSession;
use meetup_planner::config::PlannerConfig;
use meetup_planner::error::{error_info, MeetupError};
use meetup_planner::geo::MidpointAreaResolver;

async fn run(person_1: &str, person_2: &str) -> Result<(), MeetupError> {
    let config = PlannerConfig::from_env()?;
    if config.search.is_some() {
        return plan(&config, person_1, person_2).await;
    }

    let resolver = MidpointAreaResolver::from_service(config.postcodes_client()?);

    let resolution = resolver.resolve_raw(person_1, person_2).await?;
    println!("{}", serde_json::to_string_pretty(&resolution)?);
    println!(
        "Meet in {} ({}, near {})",
        resolution.area.district, resolution.area.region, resolution.area.postcode
    );
    Ok(())
}

/// With `TAVILY_API_KEY` set, run the planner tools the way an agent would.
async fn plan(config: &PlannerConfig, person_1: &str, person_2: &str) -> Result<(), MeetupError> {
    let session = MeetupSession::from_config(config)?;
    println!("Tools: {}", session.tools().names().join(", "));

    let args = serde_json::json!({
        "person_1_postcode": person_1,
        "person_2_postcode": person_2,
    });
    println!("{}", session.invoke("find_area", &args.to_string(), "call_1").await?);

    let area = session.snapshot().await.midpoint_area.unwrap_or_default();
    println!("Meet in {}", area);
    println!("Food: {}", session.invoke("search_food", "{}", "call_2").await?);
    println!("Activities: {}", session.invoke("search_activity", "{}", "call_3").await?);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (person_1, person_2) = match args.as_slice() {
        [a, b] => (a.as_str(), b.as_str()),
        _ => {
            eprintln!("usage: meetup_area <postcode 1> <postcode 2>");
            return ExitCode::from(2);
        }
    };

    match run(person_1, person_2).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", error_info(&e));
            ExitCode::FAILURE
        }
    }
}
