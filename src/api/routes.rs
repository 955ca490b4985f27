//! API Routes
//!
//! HTTP endpoint definitions.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{Account, AccountId, LedgerError, Money, MoneyError};
use crate::error::{AppError, AppResult};
use crate::handlers::{
    AccountQueryHandler, CreateAccountCommand, CreateAccountHandler, TransferCommand,
    TransferHandler,
};
use crate::ledger::Ledger;

/// Router state: the one ledger shared by every request
pub type SharedLedger = Arc<Ledger>;

// =========================================================================
// Request/Response types
// =========================================================================

/// A monetary field as it arrives on the wire: a decimal string or a JSON number.
///
/// serde_json is built with `arbitrary_precision`, so a `Number` keeps the
/// caller's digits verbatim instead of an f64 approximation.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AmountField {
    Text(String),
    Number(serde_json::Number),
}

impl<'de> Deserialize<'de> for AmountField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(text) => Ok(AmountField::Text(text)),
            Value::Number(number) => Ok(AmountField::Number(number)),
            other => Err(de::Error::custom(format!(
                "amount must be a decimal string or number, got {other}"
            ))),
        }
    }
}

impl AmountField {
    /// Parse into Money from the field's textual form.
    pub fn parse(&self) -> Result<Money, MoneyError> {
        match self {
            AmountField::Text(text) => text.parse(),
            AmountField::Number(number) => number.to_string().parse(),
        }
    }
}

impl From<&str> for AmountField {
    fn from(value: &str) -> Self {
        AmountField::Text(value.to_string())
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub account_id: String,
    pub balance: AmountField,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub from_account_id: String,
    pub to_account_id: String,
    pub amount: AmountField,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResponse {
    pub transfer_id: Uuid,
    pub from_account_id: AccountId,
    pub to_account_id: AccountId,
    pub amount: Money,
    pub status: String,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct AccountsListResponse {
    pub accounts: Vec<Account>,
    pub total: usize,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<SharedLedger> {
    Router::new()
        .route("/accounts", post(create_account).get(list_accounts))
        .route("/accounts/transfer", post(transfer))
        .route("/accounts/:account_id", get(get_account))
}

fn parse_amount(field: &AmountField) -> AppResult<Money> {
    field
        .parse()
        .map_err(|e| AppError::Ledger(LedgerError::from(e)))
}

// =========================================================================
// POST /accounts
// =========================================================================

/// Open a new account
async fn create_account(
    State(ledger): State<SharedLedger>,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Account>)> {
    let Json(request) = payload?;

    let account_id = AccountId::new(request.account_id)?;
    let balance = parse_amount(&request.balance)?;

    let handler = CreateAccountHandler::new(ledger);
    let account = handler.execute(CreateAccountCommand::new(account_id, balance))?;

    Ok((StatusCode::CREATED, Json(account)))
}

// =========================================================================
// GET /accounts
// =========================================================================

async fn list_accounts(State(ledger): State<SharedLedger>) -> Json<AccountsListResponse> {
    let accounts = AccountQueryHandler::new(ledger).list();
    Json(AccountsListResponse {
        total: accounts.len(),
        accounts,
    })
}

// =========================================================================
// GET /accounts/:account_id
// =========================================================================

/// Get an account snapshot by id
async fn get_account(
    State(ledger): State<SharedLedger>,
    Path(account_id): Path<String>,
) -> AppResult<Json<Account>> {
    let account_id = AccountId::new(account_id)?;
    let account = AccountQueryHandler::new(ledger).get(&account_id)?;
    Ok(Json(account))
}

// =========================================================================
// POST /accounts/transfer
// =========================================================================

/// Move funds between two accounts
async fn transfer(
    State(ledger): State<SharedLedger>,
    payload: Result<Json<TransferRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<TransferResponse>)> {
    let Json(request) = payload?;

    let from_account_id = AccountId::new(request.from_account_id)?;
    let to_account_id = AccountId::new(request.to_account_id)?;
    let amount = parse_amount(&request.amount)?;

    let handler = TransferHandler::new(ledger);
    let result = handler.execute(TransferCommand::new(from_account_id, to_account_id, amount))?;

    Ok((
        StatusCode::ACCEPTED,
        Json(TransferResponse {
            transfer_id: result.transfer_id,
            from_account_id: result.from_account_id,
            to_account_id: result.to_account_id,
            amount: result.amount,
            status: result.status,
            completed_at: result.completed_at,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_field_accepts_string_and_number() {
        let text: AmountField = serde_json::from_str("\"623.45\"").unwrap();
        let number: AmountField = serde_json::from_str("623.45").unwrap();
        let integer: AmountField = serde_json::from_str("1000").unwrap();

        assert_eq!(text.parse().unwrap().to_string(), "623.45");
        assert_eq!(number.parse().unwrap().to_string(), "623.45");
        assert_eq!(integer.parse().unwrap().to_string(), "1000");
    }

    #[test]
    fn test_amount_field_number_keeps_all_digits() {
        let long: AmountField = serde_json::from_str("1234567890.1234567890123").unwrap();
        assert_eq!(long.parse().unwrap().to_string(), "1234567890.1234567890123");

        let large: AmountField = serde_json::from_str("12345678901234567.89").unwrap();
        assert_eq!(large.parse().unwrap().to_string(), "12345678901234567.89");
    }

    #[test]
    fn test_amount_field_number_too_precise_is_rejected_not_rounded() {
        let number: AmountField =
            serde_json::from_str("0.1000000000000000055511151231257827").unwrap();
        assert!(number.parse().is_err());
    }

    #[test]
    fn test_amount_field_rejects_other_json_types() {
        for input in ["true", "null", "[1]", r#"{"value":1}"#] {
            let field: Result<AmountField, _> = serde_json::from_str(input);
            assert!(field.is_err(), "accepted {input}");
        }
    }

    #[test]
    fn test_amount_field_rejects_negative_number() {
        let number: AmountField = serde_json::from_str("-1000").unwrap();
        assert!(matches!(number.parse(), Err(MoneyError::Negative(_))));
    }

    #[test]
    fn test_create_request_requires_fields() {
        let missing: Result<CreateAccountRequest, _> = serde_json::from_str(r#"{"balance":1000}"#);
        assert!(missing.is_err());

        let ok: CreateAccountRequest =
            serde_json::from_str(r#"{"accountId":"Id-123","balance":1000}"#).unwrap();
        assert_eq!(ok.account_id, "Id-123");
    }
}
