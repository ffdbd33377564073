// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Dashboard alert threshold: anything at or below this count is flagged
/// regardless of the item's configured minimum.
pub const ALERT_QUANTITY: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxKind {
    #[serde(rename = "INCOME")]
    Income,
    #[serde(rename = "EXPENSE")]
    Expense,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Income => "INCOME",
            TxKind::Expense => "EXPENSE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TxKind::Income => "Income",
            TxKind::Expense => "Expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "INCOME" => Some(TxKind::Income),
            "EXPENSE" => Some(TxKind::Expense),
            _ => None,
        }
    }
}

/// One enum for both domains; which half a value belongs to is decided by
/// `matches_kind`, checked once in the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "bath")]
    Bath,
    #[serde(rename = "grooming")]
    Grooming,
    #[serde(rename = "vet")]
    Vet,
    #[serde(rename = "product-sale")]
    ProductSale,
    #[serde(rename = "other-service")]
    OtherService,
    #[serde(rename = "rent")]
    Rent,
    #[serde(rename = "salary")]
    Salary,
    #[serde(rename = "supplies")]
    Supplies,
    #[serde(rename = "medication")]
    Medication,
    #[serde(rename = "marketing")]
    Marketing,
    #[serde(rename = "other-expense")]
    OtherExpense,
}

pub const INCOME_CATEGORIES: [Category; 5] = [
    Category::Bath,
    Category::Grooming,
    Category::Vet,
    Category::ProductSale,
    Category::OtherService,
];

pub const EXPENSE_CATEGORIES: [Category; 6] = [
    Category::Rent,
    Category::Salary,
    Category::Supplies,
    Category::Medication,
    Category::Marketing,
    Category::OtherExpense,
];

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Bath => "bath",
            Category::Grooming => "grooming",
            Category::Vet => "vet",
            Category::ProductSale => "product-sale",
            Category::OtherService => "other-service",
            Category::Rent => "rent",
            Category::Salary => "salary",
            Category::Supplies => "supplies",
            Category::Medication => "medication",
            Category::Marketing => "marketing",
            Category::OtherExpense => "other-expense",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Bath => "Bath",
            Category::Grooming => "Grooming",
            Category::Vet => "Vet",
            Category::ProductSale => "Product Sale",
            Category::OtherService => "Other Service",
            Category::Rent => "Rent",
            Category::Salary => "Salary",
            Category::Supplies => "Supplies",
            Category::Medication => "Medication",
            Category::Marketing => "Marketing",
            Category::OtherExpense => "Other Expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        INCOME_CATEGORIES
            .iter()
            .chain(EXPENSE_CATEGORIES.iter())
            .copied()
            .find(|c| c.as_str() == s.trim())
    }

    pub fn matches_kind(&self, kind: TxKind) -> bool {
        match kind {
            TxKind::Income => INCOME_CATEGORIES.contains(self),
            TxKind::Expense => EXPENSE_CATEGORIES.contains(self),
        }
    }

    pub fn fallback(kind: TxKind) -> Self {
        match kind {
            TxKind::Income => Category::OtherService,
            TxKind::Expense => Category::OtherExpense,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Pix,
    Cash,
    Card,
    Transfer,
}

pub const PAYMENT_METHODS: [PaymentMethod; 4] = [
    PaymentMethod::Pix,
    PaymentMethod::Cash,
    PaymentMethod::Card,
    PaymentMethod::Transfer,
];

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Pix => "pix",
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Transfer => "transfer",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Pix => "Pix",
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Transfer => "Transfer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        PAYMENT_METHODS.iter().copied().find(|p| p.as_str() == s.trim())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Credit,
    Debit,
}

impl CardKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardKind::Credit => "credit",
            CardKind::Debit => "debit",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "credit" => Some(CardKind::Credit),
            "debit" => Some(CardKind::Debit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    None,
    Monthly,
}

impl Recurrence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recurrence::None => "none",
            Recurrence::Monthly => "monthly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Recurrence::None => "One-off",
            Recurrence::Monthly => "Monthly",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub account_id: Option<String>,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub category: Category,
    pub payment_method: PaymentMethod,
    pub card_kind: Option<CardKind>,
    pub client_name: Option<String>,
    pub staff_name: Option<String>,
    pub pet_name: Option<String>,
    pub recurrence: Recurrence,
    pub recurrence_id: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    pub account_id: Option<String>,
    pub name: String,
    pub quantity: i64,
    pub min_quantity: i64,
    pub price: Decimal,
}

impl InventoryItem {
    pub fn is_low(&self) -> bool {
        self.quantity <= self.min_quantity
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    In,
    Out,
    Adjust,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::In => "in",
            MovementKind::Out => "out",
            MovementKind::Adjust => "adjust",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "in" => Some(MovementKind::In),
            "out" => Some(MovementKind::Out),
            "adjust" => Some(MovementKind::Adjust),
            _ => None,
        }
    }
}

/// For `Adjust` the quantity is the new absolute level, not a delta.
/// Stock never goes negative; decrements clamp at zero.
pub fn apply_movement(current: i64, kind: MovementKind, quantity: i64) -> i64 {
    match kind {
        MovementKind::In => current + quantity.max(0),
        MovementKind::Out => (current - quantity.max(0)).max(0),
        MovementKind::Adjust => quantity.max(0),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryMovement {
    pub id: String,
    pub item_id: String,
    pub account_id: Option<String>,
    pub at: String,
    pub kind: MovementKind,
    pub quantity: i64,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub account_id: Option<String>,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
}

/// A transaction as it may arrive from storage, an imported dump, or an
/// old snapshot. Any JSON object deserializes into this; the normalizer
/// turns it into a canonical `Transaction`. Aliases cover the camelCase
/// field names older exports used.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct RawTransaction {
    pub id: Option<String>,
    #[serde(alias = "accountId")]
    pub account_id: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub amount: Option<serde_json::Value>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub category: Option<String>,
    #[serde(alias = "paymentMethod")]
    pub payment_method: Option<String>,
    #[serde(alias = "cardType")]
    pub card_kind: Option<String>,
    #[serde(alias = "clientName")]
    pub client_name: Option<String>,
    #[serde(alias = "userName")]
    pub staff_name: Option<String>,
    #[serde(alias = "petName")]
    pub pet_name: Option<String>,
    pub recurrence: Option<String>,
    #[serde(alias = "recurrenceId")]
    pub recurrence_id: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct RawClient {
    pub id: Option<String>,
    #[serde(alias = "accountId")]
    pub account_id: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    #[serde(alias = "createdAt")]
    pub created_at: Option<String>,
}
