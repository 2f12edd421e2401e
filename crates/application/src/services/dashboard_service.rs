//! Dashboard aggregates derived from the applicant collection
//!
//! Pure derivations; nothing here is stored. Draft records are invisible to
//! every aggregate.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use domain::{Applicant, ApplicationStatus};

/// Headline counts for the admin dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

/// One day on the membership growth chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthPoint {
    pub date: NaiveDate,
    /// Submissions received on this day
    pub new: usize,
    /// Cumulative submissions up to and including this day
    pub total: usize,
}

/// Count submitted records by status
pub fn stats(applicants: &[Applicant]) -> DashboardStats {
    applicants
        .iter()
        .filter(|a| a.status.is_submitted())
        .fold(DashboardStats::default(), |mut acc, a| {
            acc.total += 1;
            match a.status {
                ApplicationStatus::Pending => acc.pending += 1,
                ApplicationStatus::Approved => acc.approved += 1,
                ApplicationStatus::Rejected => acc.rejected += 1,
                ApplicationStatus::Draft => {},
            }
            acc
        })
}

/// Membership growth: submissions bucketed per day, oldest first, with a
/// running cumulative total
pub fn growth_series(applicants: &[Applicant]) -> Vec<GrowthPoint> {
    let mut by_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for applicant in applicants {
        if let Some(submitted_at) = applicant.submitted_at.filter(|_| applicant.status.is_submitted())
        {
            *by_day.entry(submitted_at.date_naive()).or_insert(0) += 1;
        }
    }

    let mut total = 0;
    by_day
        .into_iter()
        .map(|(date, new)| {
            total += new;
            GrowthPoint { date, new, total }
        })
        .collect()
}
