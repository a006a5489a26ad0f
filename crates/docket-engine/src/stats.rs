//! Aggregate statistics over patent collections
//!
//! Every computation is a single O(n) traversal. Percentages guard their
//! denominators explicitly; an empty collection never divides by zero.

use crate::stage::STAGE_STEPS;
use crate::status::{derive_display_status, DisplayStatus};
use chrono::{Duration, NaiveDate};
use docket_record::{Patent, StageId};
use indexmap::IndexMap;
use serde::Serialize;

/// Percentage of `part` in `whole`, 0 when `whole` is 0
fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Completion counts for summary cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SummaryStats {
    /// All patents, including withdrawn and address-less ones
    pub total: usize,
    /// Display status `completed`
    pub completed: usize,
    /// Display status `inProgress`
    pub in_progress: usize,
    /// Display status `pending`
    pub pending_approval: usize,
    /// Display status `notStarted`
    pub not_started: usize,
    /// Display status `withdrawn`
    pub withdrawn: usize,
}

impl SummaryStats {
    /// Completed share of the total
    #[inline]
    #[must_use]
    pub fn completed_pct(&self) -> f64 {
        percentage(self.completed, self.total)
    }

    /// Withdrawn share of the total
    #[inline]
    #[must_use]
    pub fn withdrawn_pct(&self) -> f64 {
        percentage(self.withdrawn, self.total)
    }
}

/// Tally display statuses across a collection
#[must_use]
pub fn summary_stats(patents: &[Patent]) -> SummaryStats {
    let mut stats = SummaryStats {
        total: patents.len(),
        ..SummaryStats::default()
    };
    for patent in patents {
        match derive_display_status(patent) {
            DisplayStatus::Completed => stats.completed += 1,
            DisplayStatus::InProgress => stats.in_progress += 1,
            DisplayStatus::Pending => stats.pending_approval += 1,
            DisplayStatus::NotStarted => stats.not_started += 1,
            DisplayStatus::Withdrawn => stats.withdrawn += 1,
        }
    }
    stats
}

/// PS → CS conversion figures
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ConversionStats {
    /// Patents whose PS stage is fully complete
    pub ps_completed: usize,
    /// Of those, patents whose CS stage is also fully complete
    pub converted: usize,
    /// `converted / ps_completed` as a percentage, 0 when no PS completions
    pub percentage: f64,
}

/// Share of PS-complete patents that converted to a complete specification
#[must_use]
pub fn conversion_stats(patents: &[Patent]) -> ConversionStats {
    let mut ps_completed = 0;
    let mut converted = 0;
    for patent in patents {
        if patent.stage_pair(StageId::Ps).is_complete() {
            ps_completed += 1;
            if patent.stage_pair(StageId::Cs).is_complete() {
                converted += 1;
            }
        }
    }
    ConversionStats {
        ps_completed,
        converted,
        percentage: percentage(converted, ps_completed),
    }
}

/// Patents with any sub-stage deadline inside `[today, today + window_days]`
///
/// All six sub-stage deadline fields are scanned; endpoints are inclusive.
/// Each patent appears at most once.
#[must_use]
pub fn deadlines_within(
    patents: &[Patent],
    today: NaiveDate,
    window_days: u32,
) -> Vec<&Patent> {
    let horizon = today + Duration::days(i64::from(window_days));
    patents
        .iter()
        .filter(|patent| {
            STAGE_STEPS.iter().any(|step| {
                patent
                    .sub_stage(step.id, step.kind)
                    .deadline
                    .is_some_and(|d| d >= today && d <= horizon)
            })
        })
        .collect()
}

/// Geographic distribution keyed by applicant state
///
/// Patents without a derivable state are excluded both from the groups and
/// from the percentage denominator, while still counting toward
/// [`SummaryStats::total`] elsewhere. Display parity requires this
/// asymmetry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StateDistribution {
    /// Count per state, ordered by count descending then name ascending
    pub groups: IndexMap<String, usize>,
    /// Patents that contributed to a group
    pub grouped_total: usize,
}

impl StateDistribution {
    /// Share of a state among grouped patents, 0 for unknown states
    #[must_use]
    pub fn percentage(&self, state: &str) -> f64 {
        percentage(
            self.groups.get(state).copied().unwrap_or(0),
            self.grouped_total,
        )
    }
}

/// Group a collection by the trailing comma-delimited address token
///
/// Case-sensitive, trimmed. Output ordering is deterministic: count
/// descending, then state name ascending.
#[must_use]
pub fn group_by_state(patents: &[Patent]) -> StateDistribution {
    let mut groups: IndexMap<String, usize> = IndexMap::new();
    let mut grouped_total = 0;
    for patent in patents {
        if let Some(state) = patent.applicant_state() {
            *groups.entry(state.to_string()).or_insert(0) += 1;
            grouped_total += 1;
        }
    }
    groups.sort_by(|k1, v1, k2, v2| v2.cmp(v1).then_with(|| k1.cmp(k2)));
    StateDistribution {
        groups,
        grouped_total,
    }
}
