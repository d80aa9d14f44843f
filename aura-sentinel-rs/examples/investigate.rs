//! Forensic Narrative Example
//!
//! This example generates narratives for a suspicious withdrawal and a
//! staking event.
//!
//! To run this example:
//! ```
//! GEMINI_API_KEY=your_api_key cargo run --example investigate
//! ```

use aura_sentinel::{error::Result, NarrativeGenerator, FALLBACK_NARRATIVE};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    println!("AuraSentinel Narrative Example");

    let generator = NarrativeGenerator::from_env()?;

    let withdrawal = json!({
        "event": "withdrawal_request",
        "user_id": "u-88213",
        "amount_usd": 250000,
        "ip": "203.0.113.7",
        "previous_ip": "198.51.100.23",
        "minutes_since_last_login": 4,
    });

    println!("\n--- Withdrawal investigation ---");
    let narrative = generator.generate_investigation(&withdrawal).await;
    println!("{}", narrative);

    let staking = json!({
        "event": "unbonding_request",
        "validator": "V1",
        "amount": 500,
        "missed_blocks_24h": 37,
    });

    println!("\n--- Staking investigation ---");
    let narrative = generator.investigate_staking_anomalies(&staking).await;
    println!("{}", narrative);

    if narrative == FALLBACK_NARRATIVE {
        println!("\nGeneration failed; check GEMINI_API_KEY and the log output above.");
    }

    Ok(())
}
