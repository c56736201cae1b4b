use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{AcceptError, AcceptResult};

/// The billing keys the gateway requires on every payment-key request.
pub const BILLING_DATA_FIELDS: [&str; 10] = [
    "apartment",
    "email",
    "floor",
    "first_name",
    "street",
    "building",
    "phone_number",
    "city",
    "country",
    "last_name",
];

/// Customer address/contact record the gateway uses for fraud and AVS
/// checks. All fields are required; values are forwarded unchanged.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BillingData {
    pub apartment: String,
    pub email: String,
    pub floor: String,
    pub first_name: String,
    pub street: String,
    pub building: String,
    pub phone_number: String,
    pub city: String,
    pub country: String,
    pub last_name: String,
}

/// Project a caller-supplied billing record into the exact `billing_data`
/// object the gateway expects: all ten keys present with their values
/// unchanged, anything else dropped. A missing or null key fails before any
/// request is issued.
pub(crate) fn project_billing_data(record: &Value) -> AcceptResult<Value> {
    let fields = record.as_object().ok_or_else(|| {
        AcceptError::InvalidInput("billing data must be a JSON object".to_string())
    })?;

    let mut billing = Map::with_capacity(BILLING_DATA_FIELDS.len());
    for key in BILLING_DATA_FIELDS {
        let value = fields.get(key).filter(|v| !v.is_null()).ok_or_else(|| {
            AcceptError::InvalidInput(format!("billing data missing required key `{key}`"))
        })?;
        billing.insert(key.to_string(), value.clone());
    }
    Ok(Value::Object(billing))
}

/// Wire tag selecting the kind of payment instrument inside a `source`
/// object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SourceSubtype {
    Card,
    Token,
}

/// Raw card details submitted in a pay request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CardSource {
    pub identifier: String,
    pub sourceholder_name: String,
    subtype: SourceSubtype,
    pub expiry_month: String,
    pub expiry_year: String,
    pub cvn: String,
}

impl CardSource {
    pub fn new(
        identifier: impl Into<String>,
        sourceholder_name: impl Into<String>,
        expiry_month: impl Into<String>,
        expiry_year: impl Into<String>,
        cvn: impl Into<String>,
    ) -> Self {
        CardSource {
            identifier: identifier.into(),
            sourceholder_name: sourceholder_name.into(),
            subtype: SourceSubtype::Card,
            expiry_month: expiry_month.into(),
            expiry_year: expiry_year.into(),
            cvn: cvn.into(),
        }
    }

    pub(crate) fn validate(&self) -> AcceptResult<()> {
        let required = [
            ("identifier", &self.identifier),
            ("sourceholder_name", &self.sourceholder_name),
            ("expiry_month", &self.expiry_month),
            ("expiry_year", &self.expiry_year),
            ("cvn", &self.cvn),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(AcceptError::InvalidInput(format!(
                    "card field `{name}` is empty"
                )));
            }
        }
        Ok(())
    }
}

/// A saved-card token issued by the gateway, usable in place of raw card
/// details.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenizedSource {
    pub identifier: String,
    subtype: SourceSubtype,
}

impl TokenizedSource {
    pub fn new(identifier: impl Into<String>) -> Self {
        TokenizedSource {
            identifier: identifier.into(),
            subtype: SourceSubtype::Token,
        }
    }
}

/// The payment instrument submitted in a pay request. The gateway accepts
/// several shapes; `Raw` forwards an arbitrary object untouched for the
/// ones not modeled here.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaymentSource {
    Card(CardSource),
    Tokenized(TokenizedSource),
    Raw(Value),
}

/// Cardholder contact record sent as `billing` on the card-payment call.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BillingContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
}

impl BillingContact {
    pub(crate) fn validate(&self) -> AcceptResult<()> {
        let required = [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("email", &self.email),
            ("phone_number", &self.phone_number),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(AcceptError::InvalidInput(format!(
                    "billing field `{name}` is empty"
                )));
            }
        }
        Ok(())
    }
}

/// Result of minting a payment key: the key itself plus the full gateway
/// response it was extracted from.
#[derive(Clone, Debug)]
pub struct PaymentKeyResponse {
    /// Short-lived, order-scoped credential authorizing one payment attempt.
    pub token: String,
    /// Everything else the gateway returned alongside the key.
    pub details: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn billing_record() -> Value {
        json!({
            "apartment": "803",
            "email": "claudia@example.com",
            "floor": "42",
            "first_name": "Claudia",
            "street": "Ethan Land",
            "building": "8028",
            "phone_number": "+201116325523",
            "city": "Jaskolskiburgh",
            "country": "EG",
            "last_name": "Nicolas",
        })
    }

    #[test]
    fn billing_projection_keeps_exactly_the_required_keys() {
        let mut record = billing_record();
        record
            .as_object_mut()
            .unwrap()
            .insert("middle_name".to_string(), json!("ignored"));

        let projected = project_billing_data(&record).unwrap();
        let object = projected.as_object().unwrap();

        assert_eq!(object.len(), BILLING_DATA_FIELDS.len());
        for key in BILLING_DATA_FIELDS {
            assert_eq!(object[key], record[key], "value changed for `{key}`");
        }
        assert!(!object.contains_key("middle_name"));
    }

    #[test]
    fn billing_projection_rejects_each_missing_key() {
        for key in BILLING_DATA_FIELDS {
            let mut record = billing_record();
            record.as_object_mut().unwrap().remove(key);

            let err = project_billing_data(&record).unwrap_err();
            match err {
                AcceptError::InvalidInput(message) => {
                    assert!(message.contains(key), "error does not name `{key}`")
                }
                other => panic!("expected InvalidInput, got {other:?}"),
            }
        }
    }

    #[test]
    fn billing_projection_rejects_null_values() {
        let mut record = billing_record();
        record
            .as_object_mut()
            .unwrap()
            .insert("floor".to_string(), Value::Null);

        assert!(matches!(
            project_billing_data(&record),
            Err(AcceptError::InvalidInput(_))
        ));
    }

    #[test]
    fn billing_projection_passes_non_string_values_through() {
        let mut record = billing_record();
        record
            .as_object_mut()
            .unwrap()
            .insert("floor".to_string(), json!(42));

        let projected = project_billing_data(&record).unwrap();
        assert_eq!(projected["floor"], json!(42));
    }

    #[test]
    fn card_source_serializes_with_fixed_subtype() {
        let card = CardSource::new("4987654321098769", "Test Holder", "05", "29", "123");
        let value = serde_json::to_value(&card).unwrap();

        assert_eq!(value["subtype"], "CARD");
        assert_eq!(value["identifier"], "4987654321098769");
        assert_eq!(value["sourceholder_name"], "Test Holder");
        assert_eq!(value["expiry_month"], "05");
        assert_eq!(value["expiry_year"], "29");
        assert_eq!(value["cvn"], "123");
    }

    #[test]
    fn tokenized_source_serializes_with_fixed_subtype() {
        let source = TokenizedSource::new("tok_8842");
        let value = serde_json::to_value(&source).unwrap();

        assert_eq!(value["subtype"], "TOKEN");
        assert_eq!(value["identifier"], "tok_8842");
    }

    #[test]
    fn payment_source_variants_serialize_transparently() {
        let card = CardSource::new("4987654321098769", "Test Holder", "05", "29", "123");
        let wrapped = serde_json::to_value(PaymentSource::Card(card.clone())).unwrap();
        assert_eq!(wrapped, serde_json::to_value(&card).unwrap());

        let raw = json!({ "identifier": "01010101010", "subtype": "WALLET" });
        let wrapped = serde_json::to_value(PaymentSource::Raw(raw.clone())).unwrap();
        assert_eq!(wrapped, raw);
    }

    #[test]
    fn card_validation_rejects_empty_fields() {
        let card = CardSource::new("4987654321098769", "Test Holder", "05", "29", "");
        match card.validate().unwrap_err() {
            AcceptError::InvalidInput(message) => assert!(message.contains("cvn")),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }
}
