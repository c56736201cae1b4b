use std::env;

use paymob_accept::client::AcceptClient;
use paymob_accept::config::AcceptConfig;
use paymob_accept::types::{BillingData, TokenizedSource};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = AcceptConfig::from_env()?;
    let client = AcceptClient::new(config);

    // Step 1: API key -> auth token. The merchant id rides along in the
    // profile.
    let auth = client.authenticate().await?;
    let token = auth["token"].as_str().expect("auth response carries a token");
    let merchant_id = auth["profile"]["id"]
        .as_u64()
        .expect("auth response carries the merchant profile id");
    println!("Authenticated as merchant {merchant_id}");

    // Step 2: register the order.
    let order = client
        .create_order(token, merchant_id, 15_000, "demo-order-0001", None)
        .await?;
    let order_id = order["id"].as_u64().expect("order response carries an id");
    println!("Created order {order_id}");

    // Step 3: mint a payment key for the order.
    let billing = BillingData {
        apartment: "803".to_string(),
        email: "claudia@example.com".to_string(),
        floor: "42".to_string(),
        first_name: "Claudia".to_string(),
        street: "Ethan Land".to_string(),
        building: "8028".to_string(),
        phone_number: "+201116325523".to_string(),
        city: "Jaskolskiburgh".to_string(),
        country: "EG".to_string(),
        last_name: "Nicolas".to_string(),
    };
    let key = client
        .create_payment_key(token, 15_000, order_id, &billing, None)
        .await?;
    println!("Payment key: {}", key.token);

    // Step 4: charge a saved-card token against the key.
    let card_token =
        env::var("PAYMOB_CARD_TOKEN").expect("PAYMOB_CARD_TOKEN environment variable must be set");
    let source = TokenizedSource::new(card_token);
    let result = client.create_pay_request(&key.token, &source).await?;
    println!("{result:#}");

    Ok(())
}
