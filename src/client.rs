use http::HeaderMap;
use reqwest::RequestBuilder;
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::AcceptConfig;
use crate::errors::{AcceptError, AcceptResult};
use crate::types::{project_billing_data, BillingContact, CardSource, PaymentKeyResponse};

const DEFAULT_CURRENCY: &str = "EGP";

/// Payment keys are minted with a fixed ten-hour lifetime; the gateway does
/// not honor per-call overrides.
const PAYMENT_KEY_EXPIRATION_SECS: u32 = 36_000;

/// Client for the Accept gateway. Holds the immutable configuration and an
/// injected reqwest client; every operation is a one-shot request/response
/// pair, so a single instance can be shared freely across tasks. Timeouts
/// and connection pooling belong to the injected client.
pub struct AcceptClient {
    config: AcceptConfig,
    client: reqwest::Client,
    headers: HeaderMap,
}

/// Builder for AcceptClient
pub struct AcceptClientBuilder {
    config: AcceptConfig,
    client: Option<reqwest::Client>,
    headers: HeaderMap,
}

impl AcceptClientBuilder {
    /// Override the underlying reqwest client (optional).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set headers attached to every request.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn build(self) -> AcceptClient {
        AcceptClient {
            config: self.config,
            client: self.client.unwrap_or_default(),
            headers: self.headers,
        }
    }
}

impl AcceptClient {
    pub fn builder(config: AcceptConfig) -> AcceptClientBuilder {
        AcceptClientBuilder {
            config,
            client: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn new(config: AcceptConfig) -> Self {
        Self::builder(config).build()
    }

    pub fn config(&self) -> &AcceptConfig {
        &self.config
    }

    fn join_url(base: &str, segment: &str) -> String {
        let base = base.trim_end_matches('/');
        format!("{}/{}", base, segment)
    }

    fn parse_url(raw: &str) -> AcceptResult<reqwest::Url> {
        reqwest::Url::parse(raw)
            .map_err(|e| AcceptError::Config(format!("Invalid gateway URL `{raw}`: {e}")))
    }

    async fn post_json<B>(
        &self,
        operation: &'static str,
        url: &str,
        bearer: Option<&str>,
        body: &B,
    ) -> AcceptResult<Value>
    where
        B: Serialize + ?Sized,
    {
        let url = Self::parse_url(url)?;
        tracing::debug!(operation, url = %url, "POST to gateway");

        let mut builder = self
            .client
            .post(url)
            .headers(self.headers.clone())
            .json(body);
        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }
        self.dispatch(operation, builder).await
    }

    async fn get_json(
        &self,
        operation: &'static str,
        url: &str,
        bearer: Option<&str>,
    ) -> AcceptResult<Value> {
        let url = Self::parse_url(url)?;
        tracing::debug!(operation, url = %url, "GET to gateway");

        let mut builder = self.client.get(url).headers(self.headers.clone());
        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }
        self.dispatch(operation, builder).await
    }

    async fn dispatch(
        &self,
        operation: &'static str,
        builder: RequestBuilder,
    ) -> AcceptResult<Value> {
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("Unknown Error: {}", e));
            tracing::warn!(operation, status = status.as_u16(), "gateway rejected request");
            return Err(AcceptError::Gateway {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Step 1: exchange the configured API key for a short-lived auth token.
    /// Returns the parsed response unmodified; the token itself is under
    /// `token`, and `profile.id` carries the merchant id used in step 2.
    pub async fn authenticate(&self) -> AcceptResult<Value> {
        let body = json!({ "api_key": self.config.api_key });
        self.post_json("authenticate", &self.config.auth_endpoint, None, &body)
            .await
    }

    /// Step 2: register an order with the gateway. Returns the raw response;
    /// its `id` field is the order id consumed by [`create_payment_key`].
    ///
    /// [`create_payment_key`]: AcceptClient::create_payment_key
    pub async fn create_order(
        &self,
        token: &str,
        merchant_id: u64,
        amount_cents: u64,
        merchant_order_id: &str,
        currency: Option<&str>,
    ) -> AcceptResult<Value> {
        let body = json!({
            "auth_token": token,
            // The gateway's legacy contract wants this flag as a string,
            // not a boolean.
            "delivery_needed": "false",
            "merchant_id": merchant_id,
            "amount_cents": amount_cents,
            "currency": currency.unwrap_or(DEFAULT_CURRENCY),
            "merchant_order_id": merchant_order_id,
            "notify_user_with_email": true,
        });
        self.post_json(
            "create_order",
            &self.config.create_order_endpoint,
            None,
            &body,
        )
        .await
    }

    /// Step 3: mint a payment key scoped to one order, amount, and the
    /// configured integration id. `billing` is any serializable record
    /// carrying the ten required billing keys; a missing key fails before
    /// the request is issued. Returns the extracted key together with the
    /// full gateway response.
    pub async fn create_payment_key<B>(
        &self,
        token: &str,
        amount_cents: u64,
        order_id: u64,
        billing: &B,
        currency: Option<&str>,
    ) -> AcceptResult<PaymentKeyResponse>
    where
        B: Serialize,
    {
        let record = serde_json::to_value(billing).map_err(|e| {
            AcceptError::InvalidInput(format!("billing data is not serializable: {e}"))
        })?;
        let billing_data = project_billing_data(&record)?;

        let body = json!({
            "auth_token": token,
            "amount_cents": amount_cents,
            "expiration": PAYMENT_KEY_EXPIRATION_SECS,
            "order_id": order_id,
            "currency": currency.unwrap_or(DEFAULT_CURRENCY),
            "integration_id": self.config.integration_id,
            // String literal, same legacy contract as `delivery_needed`.
            "lock_order_when_paid": "true",
            "billing_data": billing_data,
        });
        let details = self
            .post_json(
                "create_payment_key",
                &self.config.payment_key_endpoint,
                None,
                &body,
            )
            .await?;

        let key = details
            .get("token")
            .and_then(Value::as_str)
            .ok_or(AcceptError::MissingField("token"))?
            .to_string();
        Ok(PaymentKeyResponse {
            token: key,
            details,
        })
    }

    /// Step 4, generic form: initiate a payment against a minted key.
    /// `source` is forwarded opaquely, whatever its shape; use
    /// [`PaymentSource`](crate::types::PaymentSource) or any serializable
    /// value the gateway understands.
    pub async fn create_pay_request<S>(&self, payment_key: &str, source: &S) -> AcceptResult<Value>
    where
        S: Serialize,
    {
        let source = serde_json::to_value(source).map_err(|e| {
            AcceptError::InvalidInput(format!("payment source is not serializable: {e}"))
        })?;
        let body = json!({
            "source": source,
            "payment_token": payment_key,
        });
        self.post_json(
            "create_pay_request",
            &self.config.pay_request_endpoint,
            None,
            &body,
        )
        .await
    }

    /// Step 4, card form, for API/mobile clients: submit explicit card
    /// details plus the cardholder contact record. Card and contact fields
    /// are checked non-empty before the request; the call itself carries
    /// `Authorization: Bearer <auth_token>`.
    pub async fn make_card_payment(
        &self,
        auth_token: &str,
        payment_token: &str,
        card: &CardSource,
        contact: &BillingContact,
    ) -> AcceptResult<Value> {
        card.validate()?;
        contact.validate()?;

        let body = json!({
            "source": card,
            "billing": contact,
            "payment_token": payment_token,
        });
        self.post_json(
            "make_card_payment",
            &self.config.card_payment_endpoint,
            Some(auth_token),
            &body,
        )
        .await
    }

    /// Look up an order previously registered with the gateway.
    pub async fn get_order_details(&self, order_id: u64, auth_token: &str) -> AcceptResult<Value> {
        let url = Self::join_url(&self.config.orders_endpoint, &order_id.to_string());
        self.get_json("get_order_details", &url, Some(auth_token))
            .await
    }
}
