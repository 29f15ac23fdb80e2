//! Pure aggregation functions over raw row sets.
//!
//! Everything here is synchronous and deterministic: calling any function
//! twice on the same input produces identical output. Rows with a missing
//! key are excluded from grouping rather than bucketed under a synthetic
//! label.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::format::month_label;
use crate::insights::{DistributionEntry, MonthlyPoint, TopEntry};
use crate::metrics::SystemMetric;
use crate::tenant::{Tenant, TenantStatus};

/// Count occurrences of each distinct key produced by `key_fn`.
///
/// Entries come back sorted by count descending; ties keep first-seen
/// order. Rows yielding `None` are skipped.
pub fn distribution<T, K>(rows: &[T], key_fn: K) -> Vec<DistributionEntry>
where
    K: Fn(&T) -> Option<String>,
{
    let mut counts: HashMap<String, u64> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    for row in rows {
        let Some(key) = key_fn(row) else {
            continue;
        };
        match counts.get_mut(&key) {
            Some(count) => *count += 1,
            None => {
                counts.insert(key.clone(), 1);
                order.push(key);
            }
        }
    }
    let mut entries: Vec<DistributionEntry> = order
        .into_iter()
        .map(|name| {
            let value = counts[&name];
            DistributionEntry { name, value }
        })
        .collect();
    // sort_by is stable, so equal counts keep first-seen order.
    entries.sort_by(|a, b| b.value.cmp(&a.value));
    entries
}

/// The highest-count entry as a rounded share of `total`.
///
/// Returns the `"N/A"` placeholder when `counts` is empty or `total` is 0.
#[must_use]
pub fn top_entry(counts: &[DistributionEntry], total: u64) -> TopEntry {
    if total == 0 {
        return TopEntry::none();
    }
    let mut best: Option<&DistributionEntry> = None;
    for entry in counts {
        if best.is_none_or(|b| entry.value > b.value) {
            best = Some(entry);
        }
    }
    match best {
        Some(entry) => {
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let percentage = ((entry.value as f64 / total as f64) * 100.0).round() as u8;
            TopEntry {
                name: entry.name.clone(),
                percentage,
            }
        }
        None => TopEntry::none(),
    }
}

/// Group rows by short month label, summing `value_fn` and counting rows.
///
/// Months appear in first-seen order; callers feed rows in ascending date
/// order when they want chronological labels.
pub fn monthly_grouping<T, Ts, V>(rows: &[T], ts_fn: Ts, value_fn: V) -> Vec<MonthlyPoint>
where
    Ts: Fn(&T) -> DateTime<Utc>,
    V: Fn(&T) -> f64,
{
    let mut points: Vec<MonthlyPoint> = Vec::new();
    for row in rows {
        let month = month_label(ts_fn(row));
        let value = value_fn(row);
        match points.iter_mut().find(|p| p.month == month) {
            Some(point) => {
                point.total += value;
                point.count += 1;
            }
            None => points.push(MonthlyPoint {
                month: month.to_owned(),
                total: value,
                count: 1,
            }),
        }
    }
    points
}

/// Percentage of tenants whose status counts as churned, one decimal place.
#[must_use]
pub fn churn_rate(tenants: &[Tenant]) -> f64 {
    if tenants.is_empty() {
        return 0.0;
    }
    let churned = tenants.iter().filter(|t| t.status.is_churned()).count();
    #[allow(clippy::cast_precision_loss)]
    let pct = churned as f64 / tenants.len() as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

/// Composite 0-100 health score for a tenant's marketplace.
///
/// Starts at 100; non-active status costs 30 points, each percentage
/// point of error rate costs 10, and each point of downtime costs 2.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn health_score(tenant: &Tenant, metric: &SystemMetric) -> u8 {
    let mut score = 100.0;
    if tenant.status != TenantStatus::Active {
        score -= 30.0;
    }
    score -= metric.error_rate * 10.0;
    score -= (100.0 - metric.uptime) * 2.0;
    score.round().clamp(0.0, 100.0) as u8
}
