//! Domain records exchanged with the finboard API.
//!
//! All wire shapes are camelCase JSON; monetary amounts are integer minor
//! units (cents) to keep arithmetic exact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated identity. Opaque to everything except display code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Checking,
    Savings,
    CreditCard,
    Investment,
    Cash,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub kind: AccountKind,
    pub balance_cents: i64,
    pub currency: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
    Transfer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub account_id: Uuid,
    pub kind: TransactionKind,
    pub amount_cents: i64,
    pub currency: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    pub posted_at: DateTime<Utc>,
}

/// Client-supplied shape for creating a transaction; the server assigns the
/// id.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub account_id: Uuid,
    pub kind: TransactionKind,
    pub amount_cents: i64,
    pub currency: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    pub posted_at: DateTime<Utc>,
}

/// A monthly spending envelope for one category. `month` is "YYYY-MM".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: Uuid,
    pub category: String,
    pub month: String,
    pub limit_cents: i64,
    pub spent_cents: i64,
}

impl Budget {
    pub fn remaining_cents(&self) -> i64 {
        self.limit_cents - self.spent_cents
    }

    pub fn is_overspent(&self) -> bool {
        self.spent_cents > self.limit_cents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_wire_form_is_camel_case() {
        let user = User {
            id: Uuid::new_v4(),
            email: "sam@example.com".to_string(),
            display_name: "Sam".to_string(),
        };
        let value = serde_json::to_value(&user).expect("serialize");
        assert!(value.get("displayName").is_some());
        assert!(value.get("display_name").is_none());
    }

    #[test]
    fn transaction_round_trip() {
        let json = serde_json::json!({
            "id": "8f2f4b1f-54d7-4f9e-a4a4-0d2a85a2f0b1",
            "accountId": "0a0a0a0a-0a0a-0a0a-0a0a-0a0a0a0a0a0a",
            "kind": "expense",
            "amountCents": 1250,
            "currency": "USD",
            "category": "groceries",
            "postedAt": "2026-03-14T09:30:00Z"
        });
        let tx: Transaction = serde_json::from_value(json).expect("deserialize");
        assert_eq!(tx.kind, TransactionKind::Expense);
        assert_eq!(tx.amount_cents, 1250);
        assert!(tx.memo.is_none());
    }

    #[test]
    fn budget_remaining_and_overspend() {
        let mut budget = Budget {
            id: Uuid::new_v4(),
            category: "dining".to_string(),
            month: "2026-03".to_string(),
            limit_cents: 20_000,
            spent_cents: 12_500,
        };
        assert_eq!(budget.remaining_cents(), 7_500);
        assert!(!budget.is_overspent());

        budget.spent_cents = 21_000;
        assert!(budget.is_overspent());
    }
}
