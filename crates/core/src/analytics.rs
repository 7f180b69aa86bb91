// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Dashboard summary figures computed over a set of leads.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::lead::{Lead, Status};

/// Average deal value used when none is configured.
pub const DEFAULT_AVERAGE_DEAL_VALUE: u64 = 1500;

/// Lead counts for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    /// `YYYY-MM`.
    pub month: String,
    pub total: usize,
    pub converted: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_leads: usize,
    pub converted_leads: usize,
    pub closed_leads: usize,
    /// Converted share in percent, rounded to one decimal.
    pub conversion_rate: f64,
    pub estimated_revenue: u64,
    /// Month-over-month change of the latest bucket, in whole percent.
    pub growth_percentage: i64,
    /// Oldest month first.
    pub monthly: Vec<MonthBucket>,
}

/// Summarizes `leads`, valuing each converted lead at `average_deal_value`.
pub fn summarize(leads: &[Lead], average_deal_value: u64) -> Summary {
    let total = leads.len();
    let converted = leads.iter().filter(|l| l.status == Status::Converted).count();
    let closed = leads.iter().filter(|l| l.status == Status::Closed).count();

    let conversion_rate = if total > 0 {
        round_to_tenth(converted as f64 / total as f64 * 100.0)
    } else {
        0.0
    };

    let monthly = bucket_by_month(leads);

    Summary {
        total_leads: total,
        converted_leads: converted,
        closed_leads: closed,
        conversion_rate,
        estimated_revenue: converted as u64 * average_deal_value,
        growth_percentage: growth(&monthly),
        monthly,
    }
}

fn bucket_by_month(leads: &[Lead]) -> Vec<MonthBucket> {
    let mut months: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    for lead in leads {
        let entry = months.entry(lead.created_at.format("%Y-%m").to_string()).or_default();
        entry.0 += 1;
        if lead.status == Status::Converted {
            entry.1 += 1;
        }
    }
    months
        .into_iter()
        .map(|(month, (total, converted))| MonthBucket { month, total, converted })
        .collect()
}

// A previous month with no leads counts as 100% growth.
fn growth(monthly: &[MonthBucket]) -> i64 {
    match monthly {
        [.., prev, last] if prev.total > 0 => {
            let change = (last.total as f64 - prev.total as f64) / prev.total as f64 * 100.0;
            change.round() as i64
        }
        [.., _, _] => 100,
        _ => 0,
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
#[path = "analytics_tests.rs"]
mod tests;
