use partita_iva::vies::{ViesRestClient, ViesSoapClient};
use partita_iva::*;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    // Structural checks (no network required)
    println!("=== Structural Validation ===\n");

    let test_numbers = [
        "01743030304",
        "1234567890",   // too short
        "123456789012", // too long
        "abcde123456",  // invalid characters
        "12345678901",  // wrong check digit
        "12345678903",
    ];

    for number in &test_numbers {
        match check_structure(number) {
            Ok(digits) => println!("  {number} => valid (check digit {})", digits.check_digit()),
            Err(code) => println!("  {number} => INVALID: {code} ({})", code.uuid()),
        }
    }

    // Full pipeline against VIES; pass "soap" to use the SOAP service
    let use_soap = std::env::args().nth(1).as_deref() == Some("soap");
    println!(
        "\n=== VIES Confirmation ({}) ===\n",
        if use_soap { "SOAP" } else { "REST" }
    );

    let config = ValidatorConfig::default();
    let registry: Arc<dyn RegistryClient> = if use_soap {
        Arc::new(ViesSoapClient::from_config(&config)?)
    } else {
        Arc::new(ViesRestClient::from_config(&config)?)
    };
    let validator = VatNumberValidator::new(registry).with_config(config);
    let constraint = VatNumberConstraint::default();

    for number in &test_numbers {
        let verdict = validator.validate_str(Some(*number)).await;
        match verdict.violation(&constraint) {
            None => println!("  {number} => valid ({:?})", verdict.confirmation),
            Some(v) => println!("  {number} => {v}"),
        }
    }

    Ok(())
}
