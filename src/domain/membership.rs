// Membership domain model - Raw records and their dashboard aggregation
use super::dashboard::{DashboardData, MembershipCounts, Series, SeriesValue};
use super::navigation::{ABOUT_TO_EXPIRE_DAYS, MembershipState};
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const UNASSIGNED_BRANCH: &str = "Unassigned";
const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceUnit {
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl RecurrenceUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrenceUnit::Weekly => "weekly",
            RecurrenceUnit::Monthly => "monthly",
            RecurrenceUnit::Quarterly => "quarterly",
            RecurrenceUnit::Yearly => "yearly",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    pub name: String,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub recurrence_unit: Option<RecurrenceUnit>,
    pub state: String,
    #[serde(default)]
    pub next_invoice_date: Option<NaiveDate>,
    pub created_on: NaiveDate,
    /// Archived memberships are kept with `active = false` and never counted.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Membership {
    fn is_in_state(&self, state: MembershipState) -> bool {
        self.state == state.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub move_type: String,
    pub state: String,
    #[serde(default)]
    pub invoice_date: Option<NaiveDate>,
    pub amount_total: f64,
}

impl Invoice {
    /// Posted customer invoices are the only ones counted as revenue.
    fn is_posted_sale(&self) -> bool {
        self.move_type == "out_invoice" && self.state == "posted"
    }
}

/// Build the dashboard payload from raw records as of `today`.
pub fn summarize(memberships: &[Membership], invoices: &[Invoice], today: NaiveDate) -> DashboardData {
    let live: Vec<&Membership> = memberships.iter().filter(|m| m.active).collect();
    let window_end = today
        .checked_add_days(Days::new(ABOUT_TO_EXPIRE_DAYS))
        .unwrap_or(NaiveDate::MAX);

    let count_state = |state| live.iter().filter(|m| m.is_in_state(state)).count() as u64;
    let about_to_expire = live
        .iter()
        .filter(|m| m.is_in_state(MembershipState::Active))
        .filter(|m| {
            m.next_invoice_date
                .is_some_and(|date| date >= today && date <= window_end)
        })
        .count() as u64;

    let counts = MembershipCounts {
        active: count_state(MembershipState::Active),
        expired: count_state(MembershipState::Expired),
        suspended: count_state(MembershipState::Suspended),
        about_to_expire,
    };

    let by_branch = count_series(&live, |m| m.branch.clone(), |b| b, UNASSIGNED_BRANCH);
    let by_gender = count_series(&live, |m| m.gender.clone(), |g| g, UNKNOWN);
    let by_recurrence = count_series(
        &live,
        |m| m.recurrence_unit,
        |unit| unit.as_str().to_string(),
        UNKNOWN,
    );
    let timeline = count_series(
        &live,
        |m| Some(month_start(m.created_on)),
        month_label,
        UNKNOWN,
    );

    let mut revenue: BTreeMap<(bool, Option<NaiveDate>), f64> = BTreeMap::new();
    for invoice in invoices.iter().filter(|i| i.is_posted_sale()) {
        let month = invoice.invoice_date.map(month_start);
        *revenue.entry((month.is_none(), month)).or_default() += invoice.amount_total;
    }
    let money_monthly = Series::new(
        revenue
            .keys()
            .map(|(_, month)| Some(month.map(month_label).unwrap_or_else(|| UNKNOWN.to_string())))
            .collect(),
        revenue.values().map(|total| SeriesValue::Number(*total)).collect(),
    );

    DashboardData {
        counts,
        by_branch: Some(by_branch),
        by_gender: Some(by_gender),
        by_recurrence: Some(by_recurrence),
        timeline: Some(timeline),
        money_monthly: Some(money_monthly),
    }
}

/// Count memberships per key, ordered by key with the missing key last.
fn count_series<K, F, L>(memberships: &[&Membership], key: F, label: L, missing: &str) -> Series
where
    K: Ord,
    F: Fn(&Membership) -> Option<K>,
    L: Fn(K) -> String,
{
    let mut groups: BTreeMap<(bool, Option<K>), u64> = BTreeMap::new();
    for membership in memberships {
        let k = key(*membership);
        *groups.entry((k.is_none(), k)).or_default() += 1;
    }

    let mut labels = Vec::with_capacity(groups.len());
    let mut data = Vec::with_capacity(groups.len());
    for ((_, k), count) in groups {
        labels.push(Some(k.map(&label).unwrap_or_else(|| missing.to_string())));
        data.push(SeriesValue::from(count));
    }
    Series::new(labels, data)
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn month_label(month: NaiveDate) -> String {
    month.format("%B %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn membership(state: &str, branch: Option<&str>, created_on: NaiveDate) -> Membership {
        Membership {
            name: format!("MEM-{}", state),
            branch: branch.map(str::to_string),
            gender: Some("female".to_string()),
            recurrence_unit: Some(RecurrenceUnit::Monthly),
            state: state.to_string(),
            next_invoice_date: None,
            created_on,
            active: true,
        }
    }

    fn labels(series: &Option<Series>) -> Vec<String> {
        series
            .as_ref()
            .unwrap()
            .labels
            .iter()
            .map(|l| l.clone().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_counts_by_state_skip_archived() {
        let today = date(2025, 10, 15);
        let mut archived = membership("Active", None, today);
        archived.active = false;

        let memberships = vec![
            membership("Active", Some("Downtown"), today),
            membership("Active", Some("Uptown"), today),
            membership("Expired", Some("Downtown"), today),
            membership("Suspended", None, today),
            archived,
        ];

        let data = summarize(&memberships, &[], today);
        assert_eq!(data.counts.active, 2);
        assert_eq!(data.counts.expired, 1);
        assert_eq!(data.counts.suspended, 1);
        assert_eq!(data.counts.about_to_expire, 0);
    }

    #[test]
    fn test_about_to_expire_is_inclusive() {
        let today = date(2024, 1, 1);
        let due = |state: &str, next: NaiveDate| Membership {
            next_invoice_date: Some(next),
            ..membership(state, None, today)
        };

        let memberships = vec![
            due("Active", date(2024, 1, 1)),
            due("Active", date(2024, 1, 8)),
            due("Active", date(2024, 1, 9)),
            due("Active", date(2023, 12, 31)),
            due("Suspended", date(2024, 1, 3)),
        ];

        let data = summarize(&memberships, &[], today);
        assert_eq!(data.counts.about_to_expire, 2);
    }

    #[test]
    fn test_category_fallback_labels_sort_last() {
        let today = date(2025, 10, 15);
        let mut no_gender = membership("Active", None, today);
        no_gender.gender = None;
        no_gender.recurrence_unit = None;

        let memberships = vec![
            membership("Active", Some("Uptown"), today),
            no_gender,
            membership("Active", Some("Downtown"), today),
            membership("Expired", Some("Downtown"), today),
        ];

        let data = summarize(&memberships, &[], today);
        assert_eq!(labels(&data.by_branch), vec!["Downtown", "Uptown", "Unassigned"]);
        assert_eq!(data.by_branch.unwrap().numeric_data(), vec![2.0, 1.0, 1.0]);
        assert_eq!(labels(&data.by_gender), vec!["female", "Unknown"]);
        assert_eq!(labels(&data.by_recurrence), vec!["monthly", "Unknown"]);
    }

    #[test]
    fn test_timeline_groups_by_creation_month() {
        let memberships = vec![
            membership("Active", None, date(2025, 10, 3)),
            membership("Active", None, date(2025, 9, 28)),
            membership("Active", None, date(2025, 10, 30)),
            membership("Active", None, date(2024, 12, 1)),
        ];

        let data = summarize(&memberships, &[], date(2025, 10, 31));
        assert_eq!(
            labels(&data.timeline),
            vec!["December 2024", "September 2025", "October 2025"]
        );
        assert_eq!(data.timeline.unwrap().numeric_data(), vec![1.0, 1.0, 2.0]);
    }

    #[test]
    fn test_revenue_counts_posted_customer_invoices() {
        let invoice = |move_type: &str, state: &str, day: Option<NaiveDate>, amount: f64| Invoice {
            move_type: move_type.to_string(),
            state: state.to_string(),
            invoice_date: day,
            amount_total: amount,
        };

        let invoices = vec![
            invoice("out_invoice", "posted", Some(date(2025, 9, 2)), 100.0),
            invoice("out_invoice", "posted", Some(date(2025, 9, 20)), 50.5),
            invoice("out_invoice", "draft", Some(date(2025, 9, 21)), 999.0),
            invoice("in_invoice", "posted", Some(date(2025, 9, 22)), 999.0),
            invoice("out_invoice", "posted", Some(date(2025, 10, 1)), 75.0),
            invoice("out_invoice", "posted", None, 10.0),
        ];

        let data = summarize(&[], &invoices, date(2025, 10, 15));
        assert_eq!(
            labels(&data.money_monthly),
            vec!["September 2025", "October 2025", "Unknown"]
        );
        assert_eq!(data.money_monthly.unwrap().numeric_data(), vec![150.5, 75.0, 10.0]);
    }

    #[test]
    fn test_decode_membership_defaults() {
        let membership: Membership = serde_json::from_str(
            r#"{"name": "MEM/0001", "state": "Active", "created_on": "2025-10-01"}"#,
        )
        .unwrap();

        assert!(membership.active);
        assert!(membership.branch.is_none());
        assert!(membership.next_invoice_date.is_none());
    }
}
