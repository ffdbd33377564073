// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, PaymentMethod, Transaction, TxKind};
use crate::utils::parse_date;
use anyhow::{Result, anyhow};
use chrono::NaiveDate;

/// All predicates are ANDed; `None` means pass-all (the CLI sentinel
/// `all` maps to `None`).
#[derive(Debug, Default, Clone)]
pub struct TxFilter {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub kind: Option<TxKind>,
    pub category: Option<Category>,
    pub payment: Option<PaymentMethod>,
    pub search: Option<String>,
}

impl TxFilter {
    pub fn from_matches(sub: &clap::ArgMatches) -> Result<Self> {
        let mut f = TxFilter::default();
        if let Some(s) = sub.get_one::<String>("from") {
            f.date_from = Some(parse_date(s)?);
        }
        if let Some(s) = sub.get_one::<String>("to") {
            f.date_to = Some(parse_date(s)?);
        }
        if let Some(s) = sub.get_one::<String>("type") {
            if s != "all" {
                f.kind = Some(
                    TxKind::parse(s).ok_or_else(|| anyhow!("Unknown type '{}' (income|expense|all)", s))?,
                );
            }
        }
        if let Some(s) = sub.get_one::<String>("category") {
            if s != "all" {
                f.category =
                    Some(Category::parse(s).ok_or_else(|| anyhow!("Unknown category '{}'", s))?);
            }
        }
        if let Some(s) = sub.get_one::<String>("payment") {
            if s != "all" {
                f.payment = Some(
                    PaymentMethod::parse(s).ok_or_else(|| anyhow!("Unknown payment method '{}'", s))?,
                );
            }
        }
        if let Some(s) = sub.get_one::<String>("search") {
            f.search = Some(s.to_string());
        }
        Ok(f)
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some(from) = self.date_from {
            if tx.date < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if tx.date > to {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if tx.kind != kind {
                return false;
            }
        }
        if let Some(category) = self.category {
            if tx.category != category {
                return false;
            }
        }
        if let Some(payment) = self.payment {
            if tx.payment_method != payment {
                return false;
            }
        }
        if let Some(q) = self.search.as_deref() {
            let q = q.trim().to_lowercase();
            if !q.is_empty() {
                let hay_hit = tx.description.to_lowercase().contains(&q)
                    || tx
                        .pet_name
                        .as_deref()
                        .is_some_and(|s| s.to_lowercase().contains(&q))
                    || tx
                        .client_name
                        .as_deref()
                        .is_some_and(|s| s.to_lowercase().contains(&q));
                if !hay_hit {
                    return false;
                }
            }
        }
        true
    }
}

pub fn apply(txs: &[Transaction], f: &TxFilter) -> Vec<Transaction> {
    txs.iter().filter(|t| f.matches(t)).cloned().collect()
}
