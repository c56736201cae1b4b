use paymob_accept::client::AcceptClient;
use paymob_accept::config::AcceptConfig;
use paymob_accept::types::{BillingContact, BillingData, CardSource};
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "sk_test_gateway";
pub const TEST_INTEGRATION_ID: u64 = 4321;

/// Config with every endpoint pointed at the mock gateway.
pub fn test_config(server: &MockServer) -> AcceptConfig {
    let base = server.uri();
    AcceptConfig::new(TEST_API_KEY, TEST_INTEGRATION_ID)
        .with_auth_endpoint(format!("{base}/api/auth/tokens"))
        .with_create_order_endpoint(format!("{base}/api/ecommerce/orders"))
        .with_payment_key_endpoint(format!("{base}/api/acceptance/payment_keys"))
        .with_pay_request_endpoint(format!("{base}/api/acceptance/payments/pay"))
        .with_card_payment_endpoint(format!("{base}/api/acceptance/payments/pay"))
        .with_orders_endpoint(format!("{base}/api/ecommerce/orders"))
}

pub fn test_client(server: &MockServer) -> AcceptClient {
    AcceptClient::new(test_config(server))
}

pub fn sample_billing() -> BillingData {
    BillingData {
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
    }
}

pub fn sample_card() -> CardSource {
    CardSource::new("4987654321098769", "Test Holder", "05", "29", "123")
}

pub fn sample_contact() -> BillingContact {
    BillingContact {
        first_name: "Claudia".to_string(),
        last_name: "Nicolas".to_string(),
        email: "claudia@example.com".to_string(),
        phone_number: "+201116325523".to_string(),
    }
}
