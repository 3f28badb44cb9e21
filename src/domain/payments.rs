//! Payments domain models and types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::shared::error::{AppError, AppResult, MISSING_FIELDS_MESSAGE};

/// Default currency when the caller sends an empty one
pub const DEFAULT_CURRENCY: &str = "EUR";
/// Fallback payer-facing message
pub const DEFAULT_PAYER_MESSAGE: &str = "Payment request";
/// Fallback payee note
pub const DEFAULT_PAYEE_NOTE: &str = "Payment from your app";
/// Party id type for mobile subscriber numbers
pub const PARTY_ID_TYPE_MSISDN: &str = "MSISDN";

/// Scalar field as sent by the caller: a JSON string, number or boolean
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl FieldValue {
    /// Empty strings, numeric zero and `false` count as absent
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.is_empty(),
            FieldValue::Number(number) => number.as_f64().map_or(false, |n| n == 0.0),
            FieldValue::Flag(flag) => !flag,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Number(number) => write_number(f, number),
            FieldValue::Flag(flag) => write!(f, "{}", flag),
        }
    }
}

/// Integral floats print without a fractional part (`500.0` is `500`)
fn write_number(f: &mut std::fmt::Formatter<'_>, number: &serde_json::Number) -> std::fmt::Result {
    match number.as_f64() {
        Some(n) if number.is_f64() && n.fract() == 0.0 && n.abs() < 1e21 => write!(f, "{:.0}", n),
        _ => write!(f, "{}", number),
    }
}

/// Payer as sent by the caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayerInput {
    pub party_id: Option<FieldValue>,
}

/// Inbound request-to-pay body
///
/// Every field is optional at the wire level so that a missing field turns
/// into a validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub amount: Option<FieldValue>,
    pub currency: Option<FieldValue>,
    pub external_id: Option<FieldValue>,
    pub payer: Option<PayerInput>,
    pub payer_message: Option<FieldValue>,
    pub payee_note: Option<FieldValue>,
}

impl PaymentRequest {
    /// Parse a JSON request body
    ///
    /// An empty body is an empty request. Malformed JSON or a top-level value
    /// other than an object or array is an internal error; a well-formed body
    /// whose fields have unusable types is reported as missing fields.
    pub fn from_json_slice(body: &[u8]) -> AppResult<Self> {
        let body = body.trim_ascii();
        match body.first() {
            None => return Ok(Self::default()),
            Some(b'{') | Some(b'[') => {}
            Some(_) => {
                return Err(AppError::Internal(
                    "Request body is not a JSON object or array".to_string(),
                ))
            }
        }

        serde_json::from_slice(body).map_err(|e| {
            if e.is_data() {
                AppError::Validation(MISSING_FIELDS_MESSAGE.to_string())
            } else {
                AppError::Internal(format!("Invalid JSON body: {}", e))
            }
        })
    }

    /// Check that amount, currency, externalId and payer.partyId are present and non-blank
    pub fn validate_required(&self) -> AppResult<()> {
        let party_id = self.payer.as_ref().and_then(|payer| present(&payer.party_id));

        if present(&self.amount).is_some()
            && present(&self.currency).is_some()
            && present(&self.external_id).is_some()
            && party_id.is_some()
        {
            Ok(())
        } else {
            Err(AppError::Validation(MISSING_FIELDS_MESSAGE.to_string()))
        }
    }

    /// Shape the provider payload, applying coercions and fallbacks
    pub fn to_provider_payload(&self) -> AppResult<RequestToPayPayload> {
        self.validate_required()?;

        let missing = || AppError::Validation(MISSING_FIELDS_MESSAGE.to_string());
        let party_id = self
            .payer
            .as_ref()
            .and_then(|payer| present(&payer.party_id))
            .ok_or_else(missing)?;

        Ok(RequestToPayPayload {
            amount: present(&self.amount).ok_or_else(missing)?.to_string(),
            currency: text_or(&self.currency, DEFAULT_CURRENCY),
            external_id: present(&self.external_id).ok_or_else(missing)?.to_string(),
            payer: Party {
                party_id_type: PARTY_ID_TYPE_MSISDN.to_string(),
                party_id: party_id.to_string(),
            },
            payer_message: text_or(&self.payer_message, DEFAULT_PAYER_MESSAGE),
            payee_note: text_or(&self.payee_note, DEFAULT_PAYEE_NOTE),
        })
    }
}

fn present(value: &Option<FieldValue>) -> Option<&FieldValue> {
    value.as_ref().filter(|v| !v.is_blank())
}

fn text_or(value: &Option<FieldValue>, fallback: &str) -> String {
    present(value).map_or_else(|| fallback.to_string(), ToString::to_string)
}

/// Party as the provider expects it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub party_id_type: String,
    pub party_id: String,
}

/// Body of the provider's request-to-pay call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RequestToPayPayload {
    pub amount: String,
    pub currency: String,
    pub external_id: String,
    pub payer: Party,
    pub payer_message: String,
    pub payee_note: String,
}

/// Server-generated identifier correlating a submission with later status queries
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentReference(String);

impl PaymentReference {
    /// Fresh random (v4) reference
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PaymentReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque bearer token; fetched per call and never reused
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Successful submission acknowledgment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSubmitted {
    pub success: bool,
    pub reference_id: PaymentReference,
    pub message: String,
}

impl PaymentSubmitted {
    pub fn new(reference_id: PaymentReference) -> Self {
        Self {
            success: true,
            reference_id,
            message: "Payment request submitted successfully".to_string(),
        }
    }
}

/// Provider-reported status plus the raw payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentStatusResult {
    pub success: bool,
    pub status: Value,
    pub data: Value,
}

impl PaymentStatusResult {
    /// `status` is lifted from the payload; `null` when the provider omits it
    pub fn from_provider(data: Value) -> Self {
        let status = data.get("status").cloned().unwrap_or(Value::Null);
        Self {
            success: true,
            status,
            data,
        }
    }
}

/// Provider balance payload, returned verbatim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountBalanceResult {
    pub success: bool,
    pub balance: Value,
}

impl AccountBalanceResult {
    pub fn from_provider(balance: Value) -> Self {
        Self {
            success: true,
            balance,
        }
    }
}

/// Opaque payload pushed by the provider
#[derive(Debug, Clone, PartialEq)]
pub enum CallbackNotification {
    Json(Value),
    Raw(String),
    Empty,
}

impl CallbackNotification {
    /// Interpret a raw body; this never fails
    pub fn from_body(body: &[u8]) -> Self {
        if body.iter().all(|b| b.is_ascii_whitespace()) {
            return CallbackNotification::Empty;
        }

        match serde_json::from_slice::<Value>(body) {
            Ok(value) => CallbackNotification::Json(value),
            Err(_) => CallbackNotification::Raw(String::from_utf8_lossy(body).into_owned()),
        }
    }

    /// Payload as JSON for logging
    pub fn to_value(&self) -> Value {
        match self {
            CallbackNotification::Json(value) => value.clone(),
            CallbackNotification::Raw(text) => Value::String(text.clone()),
            CallbackNotification::Empty => Value::Object(Default::default()),
        }
    }
}
