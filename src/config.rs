use std::env;

use crate::errors::{AcceptError, AcceptResult};

pub const DEFAULT_AUTH_ENDPOINT: &str = "https://accept.paymobsolutions.com/api/auth/tokens";
pub const DEFAULT_CREATE_ORDER_ENDPOINT: &str =
    "https://accept.paymobsolutions.com/api/ecommerce/orders";
pub const DEFAULT_PAYMENT_KEY_ENDPOINT: &str =
    "https://accept.paymobsolutions.com/api/acceptance/payment_keys";
pub const DEFAULT_PAY_REQUEST_ENDPOINT: &str =
    "https://accept.paymobsolutions.com/api/acceptance/payments/pay";
pub const DEFAULT_CARD_PAYMENT_ENDPOINT: &str =
    "https://accept.paymobsolutions.com/api/acceptance/payments/pay";
pub const DEFAULT_ORDERS_ENDPOINT: &str =
    "https://accept.paymobsolutions.com/api/ecommerce/orders";

/// Everything the client needs to talk to the gateway: the merchant's API
/// key, the integration profile to charge against, and the endpoint URLs.
/// Endpoints default to the production gateway and are individually
/// overridable, e.g. for staging or a mock server.
#[derive(Clone, Debug)]
pub struct AcceptConfig {
    /// Merchant API key exchanged for an auth token.
    pub api_key: String,
    /// Gateway-assigned id selecting a payment integration profile.
    pub integration_id: u64,
    pub auth_endpoint: String,
    pub create_order_endpoint: String,
    pub payment_key_endpoint: String,
    pub pay_request_endpoint: String,
    pub card_payment_endpoint: String,
    /// Base URL for order lookup; the order id is appended as a path
    /// segment.
    pub orders_endpoint: String,
}

impl AcceptConfig {
    pub fn new(api_key: impl Into<String>, integration_id: u64) -> Self {
        AcceptConfig {
            api_key: api_key.into(),
            integration_id,
            auth_endpoint: DEFAULT_AUTH_ENDPOINT.to_string(),
            create_order_endpoint: DEFAULT_CREATE_ORDER_ENDPOINT.to_string(),
            payment_key_endpoint: DEFAULT_PAYMENT_KEY_ENDPOINT.to_string(),
            pay_request_endpoint: DEFAULT_PAY_REQUEST_ENDPOINT.to_string(),
            card_payment_endpoint: DEFAULT_CARD_PAYMENT_ENDPOINT.to_string(),
            orders_endpoint: DEFAULT_ORDERS_ENDPOINT.to_string(),
        }
    }

    /// Read configuration from `PAYMOB_API_KEY` and `PAYMOB_INTEGRATION_ID`,
    /// with optional `PAYMOB_*_ENDPOINT` overrides.
    pub fn from_env() -> AcceptResult<Self> {
        let api_key = env::var("PAYMOB_API_KEY").map_err(|_| {
            AcceptError::Config(
                "Missing required PAYMOB_API_KEY environment variable".to_string(),
            )
        })?;
        let integration_id = env::var("PAYMOB_INTEGRATION_ID")
            .map_err(|_| {
                AcceptError::Config(
                    "Missing required PAYMOB_INTEGRATION_ID environment variable".to_string(),
                )
            })?
            .parse::<u64>()
            .map_err(|e| {
                AcceptError::Config(format!("PAYMOB_INTEGRATION_ID is not a number: {e}"))
            })?;

        let mut config = AcceptConfig::new(api_key, integration_id);
        let overrides = [
            ("PAYMOB_AUTH_ENDPOINT", &mut config.auth_endpoint),
            (
                "PAYMOB_CREATE_ORDER_ENDPOINT",
                &mut config.create_order_endpoint,
            ),
            (
                "PAYMOB_PAYMENT_KEY_ENDPOINT",
                &mut config.payment_key_endpoint,
            ),
            (
                "PAYMOB_PAY_REQUEST_ENDPOINT",
                &mut config.pay_request_endpoint,
            ),
            (
                "PAYMOB_CARD_PAYMENT_ENDPOINT",
                &mut config.card_payment_endpoint,
            ),
            ("PAYMOB_ORDERS_ENDPOINT", &mut config.orders_endpoint),
        ];
        for (var, slot) in overrides {
            if let Ok(url) = env::var(var) {
                *slot = url;
            }
        }
        Ok(config)
    }

    pub fn with_auth_endpoint(mut self, url: impl Into<String>) -> Self {
        self.auth_endpoint = url.into();
        self
    }

    pub fn with_create_order_endpoint(mut self, url: impl Into<String>) -> Self {
        self.create_order_endpoint = url.into();
        self
    }

    pub fn with_payment_key_endpoint(mut self, url: impl Into<String>) -> Self {
        self.payment_key_endpoint = url.into();
        self
    }

    pub fn with_pay_request_endpoint(mut self, url: impl Into<String>) -> Self {
        self.pay_request_endpoint = url.into();
        self
    }

    pub fn with_card_payment_endpoint(mut self, url: impl Into<String>) -> Self {
        self.card_payment_endpoint = url.into();
        self
    }

    pub fn with_orders_endpoint(mut self, url: impl Into<String>) -> Self {
        self.orders_endpoint = url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_config_defaults_to_production_endpoints() {
        let config = AcceptConfig::new("sk_test", 1771);

        assert_eq!(config.api_key, "sk_test");
        assert_eq!(config.integration_id, 1771);
        assert_eq!(config.auth_endpoint, DEFAULT_AUTH_ENDPOINT);
        assert_eq!(config.create_order_endpoint, DEFAULT_CREATE_ORDER_ENDPOINT);
        assert_eq!(config.payment_key_endpoint, DEFAULT_PAYMENT_KEY_ENDPOINT);
        assert_eq!(config.pay_request_endpoint, DEFAULT_PAY_REQUEST_ENDPOINT);
        assert_eq!(config.card_payment_endpoint, DEFAULT_CARD_PAYMENT_ENDPOINT);
        assert_eq!(config.orders_endpoint, DEFAULT_ORDERS_ENDPOINT);
    }

    #[test]
    fn endpoint_overrides_replace_only_their_target() {
        let config = AcceptConfig::new("sk_test", 1771)
            .with_auth_endpoint("https://staging.example.com/auth")
            .with_orders_endpoint("https://staging.example.com/orders");

        assert_eq!(config.auth_endpoint, "https://staging.example.com/auth");
        assert_eq!(config.orders_endpoint, "https://staging.example.com/orders");
        assert_eq!(config.create_order_endpoint, DEFAULT_CREATE_ORDER_ENDPOINT);
        assert_eq!(config.pay_request_endpoint, DEFAULT_PAY_REQUEST_ENDPOINT);
    }
}
