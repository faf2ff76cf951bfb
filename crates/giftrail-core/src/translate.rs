//! Translation of caller issuance requests into the provider wire shape.
//!
//! Validation runs first and is exhaustive: every violated constraint is
//! collected into one [`ValidationError`]. Only a fully valid request is
//! translated, so the signer and the provider client never see malformed
//! input.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::ValidationError;
use crate::request::IssuanceRequest;
use crate::wire::{canonical_amount, FaceValue, ProviderRequest};

/// Default delivery method when the caller does not specify one.
pub const DEFAULT_DELIVERY_METHOD: &str = "url";
/// Default fulfilment side when the caller does not specify one.
pub const DEFAULT_FULFILMENT_BY: &str = "partner";
/// Default provider sector when the caller does not specify one.
pub const DEFAULT_SECTOR: &str = "marketplace";
/// Default currency when the caller does not specify one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Sub-fields that must be present (and non-empty) whenever the caller
/// supplies fulfilment parameters.
const REQUIRED_FULFILMENT_FIELDS: [&str; 6] = [
    "to_first_name",
    "to_last_name",
    "address_1",
    "city",
    "postal_code",
    "country",
];

/// Validate and normalize a caller request into the provider wire shape.
///
/// Applies the documented defaults, normalizes a scalar `brandIdentifier`
/// into the one-element `choices` list, and canonicalizes the amount so the
/// signed text and the serialized body cannot drift. Fails with the complete
/// list of violations when any constraint is not met.
pub fn translate(request: &IssuanceRequest) -> Result<ProviderRequest, ValidationError> {
    let mut violations = Vec::new();

    let amount = validate_amount(request.amount.as_ref(), &mut violations);
    let choices = validate_brand(request.brand_identifier.as_ref(), &mut violations);
    let client_request_id =
        validate_client_request_id(request.client_request_id.as_ref(), &mut violations);
    validate_fulfilment_parameters(request.fulfilment_parameters.as_ref(), &mut violations);

    let amount = match amount.map(canonical_amount) {
        Some(Some(canonical)) => Some(canonical),
        Some(None) => {
            // Outside the JSON number range; report it as the same class of
            // violation the caller already understands.
            violations.push("amount must be a positive number".to_string());
            None
        }
        None => None,
    };

    match (amount, choices, client_request_id) {
        (Some(amount), Some(choices), Some(client_request_id)) if violations.is_empty() => {
            Ok(ProviderRequest {
                client_request_id,
                choices,
                face_value: FaceValue {
                    amount,
                    currency: request
                        .currency
                        .clone()
                        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
                },
                delivery_method: request
                    .delivery_method
                    .clone()
                    .unwrap_or_else(|| DEFAULT_DELIVERY_METHOD.to_string()),
                fulfilment_by: request
                    .fulfilment_by
                    .clone()
                    .unwrap_or_else(|| DEFAULT_FULFILMENT_BY.to_string()),
                sector: request
                    .sector
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SECTOR.to_string()),
                fulfilment_parameters: request
                    .fulfilment_parameters
                    .clone()
                    .filter(|value| !value.is_null()),
            })
        }
        _ => Err(ValidationError::new(violations)),
    }
}

fn validate_amount(value: Option<&Value>, violations: &mut Vec<String>) -> Option<Decimal> {
    let Some(value) = value.filter(|value| !value.is_null()) else {
        violations.push("amount is required".to_string());
        return None;
    };

    let parsed = match value {
        Value::Number(number) => decimal_from_number(number),
        _ => None,
    };

    match parsed {
        Some(amount) if amount > Decimal::ZERO => Some(amount),
        _ => {
            violations.push("amount must be a positive number".to_string());
            None
        }
    }
}

fn decimal_from_number(number: &serde_json::Number) -> Option<Decimal> {
    if let Some(whole) = number.as_i64() {
        return Some(Decimal::from(whole));
    }
    if let Some(whole) = number.as_u64() {
        return Some(Decimal::from(whole));
    }
    number.as_f64().and_then(Decimal::from_f64)
}

fn validate_brand(value: Option<&Value>, violations: &mut Vec<String>) -> Option<Vec<String>> {
    let Some(value) = value.filter(|value| !value.is_null()) else {
        violations.push("brandIdentifier is required".to_string());
        return None;
    };

    match value {
        Value::String(brand) if !brand.is_empty() => Some(vec![brand.clone()]),
        Value::String(_) => {
            violations.push("brandIdentifier must not be empty".to_string());
            None
        }
        Value::Array(entries) => {
            if entries.is_empty() {
                violations.push("brandIdentifier must not be empty".to_string());
                return None;
            }
            let mut choices = Vec::with_capacity(entries.len());
            for entry in entries {
                match entry {
                    Value::String(brand) if !brand.is_empty() => choices.push(brand.clone()),
                    _ => {
                        violations
                            .push("brandIdentifier must be a string or array of strings".to_string());
                        return None;
                    }
                }
            }
            Some(choices)
        }
        _ => {
            violations.push("brandIdentifier must be a string or array of strings".to_string());
            None
        }
    }
}

fn validate_client_request_id(
    value: Option<&Value>,
    violations: &mut Vec<String>,
) -> Option<String> {
    let Some(value) = value.filter(|value| !value.is_null()) else {
        violations.push("clientRequestId is required".to_string());
        return None;
    };

    match value {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::String(_) => {
            violations.push("clientRequestId must not be empty".to_string());
            None
        }
        _ => {
            violations.push("clientRequestId must be a string".to_string());
            None
        }
    }
}

fn validate_fulfilment_parameters(value: Option<&Value>, violations: &mut Vec<String>) {
    let Some(value) = value.filter(|value| !value.is_null()) else {
        return;
    };

    let Some(params) = value.as_object() else {
        violations.push("fulfilmentParameters must be an object".to_string());
        return;
    };

    for field in REQUIRED_FULFILMENT_FIELDS {
        let present = params.get(field).is_some_and(|entry| match entry {
            Value::String(text) => !text.is_empty(),
            Value::Null => false,
            _ => true,
        });
        if !present {
            violations.push(format!("fulfilmentParameters.{field} is required"));
        }
    }
}
