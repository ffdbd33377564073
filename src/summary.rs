// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, PaymentMethod, Transaction, TxKind};
use crate::utils::month_key;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub profit: Decimal,
}

pub fn totals(txs: &[Transaction]) -> Totals {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for t in txs {
        match t.kind {
            TxKind::Income => income += t.amount,
            TxKind::Expense => expense += t.amount,
        }
    }
    Totals {
        income,
        expense,
        profit: income - expense,
    }
}

// BTreeMap keeps ties in key order; the stable sort then only reorders by
// amount.
fn ranked<K: Ord>(pairs: BTreeMap<K, Decimal>) -> Vec<(K, Decimal)> {
    let mut items: Vec<(K, Decimal)> = pairs.into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1));
    items
}

pub fn by_category(txs: &[Transaction]) -> Vec<(Category, Decimal)> {
    let mut agg: BTreeMap<Category, Decimal> = BTreeMap::new();
    for t in txs {
        *agg.entry(t.category).or_insert(Decimal::ZERO) += t.amount;
    }
    ranked(agg)
}

pub fn by_payment(txs: &[Transaction]) -> Vec<(PaymentMethod, Decimal)> {
    let mut agg: BTreeMap<PaymentMethod, Decimal> = BTreeMap::new();
    for t in txs {
        *agg.entry(t.payment_method).or_insert(Decimal::ZERO) += t.amount;
    }
    ranked(agg)
}

/// Highest-grossing income category, if any income exists.
pub fn best_service(txs: &[Transaction]) -> Option<(Category, Decimal)> {
    let mut agg: BTreeMap<Category, Decimal> = BTreeMap::new();
    for t in txs {
        if t.kind == TxKind::Income {
            *agg.entry(t.category).or_insert(Decimal::ZERO) += t.amount;
        }
    }
    ranked(agg).into_iter().next()
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthRow {
    pub month: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub profit: Decimal,
}

/// Six calendar months ending at the current one, oldest first. Takes the
/// UNFILTERED collection by contract: the trend stays global no matter
/// what the active filter selects.
pub fn monthly_comparison(all: &[Transaction], today: NaiveDate) -> Vec<MonthRow> {
    let mut keys = Vec::with_capacity(6);
    let (mut y, mut m) = (today.year(), today.month());
    for _ in 0..6 {
        keys.push(format!("{:04}-{:02}", y, m));
        if m == 1 {
            y -= 1;
            m = 12;
        } else {
            m -= 1;
        }
    }
    keys.reverse();

    keys.into_iter()
        .map(|key| {
            let mut income = Decimal::ZERO;
            let mut expense = Decimal::ZERO;
            for t in all.iter().filter(|t| month_key(t.date) == key) {
                match t.kind {
                    TxKind::Income => income += t.amount,
                    TxKind::Expense => expense += t.amount,
                }
            }
            MonthRow {
                month: key,
                income,
                expense,
                profit: income - expense,
            }
        })
        .collect()
}
