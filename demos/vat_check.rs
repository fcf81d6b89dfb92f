//! Validate a few VAT numbers against the live VIES service.
//!
//! Run with: `RUST_LOG=vies_check=debug cargo run --example vat_check`

use tracing_subscriber::EnvFilter;
use vies_check::vies::*;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let client = match ViesClient::new() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("cannot create client: {e}");
            return;
        }
    };

    println!("=== Service Status ===\n");

    match client.service_status().await {
        Ok(status) => {
            println!("  gateway available: {}", status.global_available);
            for (country, availability) in &status.per_country {
                println!("  {country}: {availability:?}");
            }
        }
        Err(e) => println!("  status unavailable: {e}"),
    }

    println!("\n=== VAT Number Validation ===\n");

    let numbers = [
        ("DE", "814145736"),
        ("se", "556887565101"),
        ("NL", "006181338B01"),
        ("DE", "123456789"), // not registered
        ("US", "123456789"), // not a member state
    ];

    let options = ValidationOptions::new().timeout_ms(5_000);
    for (country, number) in numbers {
        match client.validate(country, number, options).await {
            Ok(ValidationResult::Full(check)) => println!(
                "  {country}{number} => valid={} name={}",
                check.valid,
                check.name.as_deref().unwrap_or("—")
            ),
            Ok(ValidationResult::Valid(valid)) => println!("  {country}{number} => valid={valid}"),
            Err(e) => println!("  {country}{number} => ERROR ({:?}): {e}", e.kind()),
        }
    }
}
