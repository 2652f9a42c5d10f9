// Navigation domain model - Typed requests asking the host to open a filtered list
use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::str::FromStr;

/// Host model the membership list views operate on.
pub const MEMBERSHIP_ENTITY: &str = "mgs_gym.membership";

/// Window, in days, for memberships whose next invoice is coming up.
pub const ABOUT_TO_EXPIRE_DAYS: u64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipState {
    Active,
    Expired,
    Suspended,
}

impl MembershipState {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipState::Active => "Active",
            MembershipState::Expired => "Expired",
            MembershipState::Suspended => "Suspended",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FilterOperator {
    #[serde(rename = "=")]
    Equals,
    #[serde(rename = ">=")]
    AtLeast,
    #[serde(rename = "<=")]
    AtMost,
}

/// One `(field, operator, value)` predicate; serialized as a triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "(String, FilterOperator, String)")]
pub struct FilterClause {
    pub field: String,
    pub operator: FilterOperator,
    pub value: String,
}

impl FilterClause {
    pub fn new(field: &str, operator: FilterOperator, value: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            operator,
            value: value.into(),
        }
    }

    fn state_is(state: MembershipState) -> Self {
        Self::new("state", FilterOperator::Equals, state.as_str())
    }
}

impl From<FilterClause> for (String, FilterOperator, String) {
    fn from(clause: FilterClause) -> Self {
        (clause.field, clause.operator, clause.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    List,
    Form,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavigationMode {
    ReplaceCurrent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilteredListView {
    pub target_entity: String,
    pub display_name: String,
    pub views: Vec<ViewMode>,
    pub filter: Vec<FilterClause>,
    pub navigation_mode: NavigationMode,
}

/// Requests the dashboard can hand to the host's action dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum NavigationRequest {
    OpenFilteredList(FilteredListView),
}

impl NavigationRequest {
    fn membership_list(display_name: &str, filter: Vec<FilterClause>) -> Self {
        NavigationRequest::OpenFilteredList(FilteredListView {
            target_entity: MEMBERSHIP_ENTITY.to_string(),
            display_name: display_name.to_string(),
            views: vec![ViewMode::List, ViewMode::Form],
            filter,
            navigation_mode: NavigationMode::ReplaceCurrent,
        })
    }

    pub fn active_memberships() -> Self {
        Self::membership_list(
            "Active Memberships",
            vec![FilterClause::state_is(MembershipState::Active)],
        )
    }

    pub fn expired_memberships() -> Self {
        Self::membership_list(
            "Expired Memberships",
            vec![FilterClause::state_is(MembershipState::Expired)],
        )
    }

    pub fn suspended_memberships() -> Self {
        Self::membership_list(
            "Suspended Memberships",
            vec![FilterClause::state_is(MembershipState::Suspended)],
        )
    }

    /// Active memberships whose next invoice falls within the coming week,
    /// both ends inclusive.
    pub fn about_to_expire(today: NaiveDate) -> Self {
        let until = today
            .checked_add_days(Days::new(ABOUT_TO_EXPIRE_DAYS))
            .unwrap_or(NaiveDate::MAX);

        Self::membership_list(
            "About to Expire",
            vec![
                FilterClause::new("next_invoice_date", FilterOperator::AtLeast, iso_date(today)),
                FilterClause::new("next_invoice_date", FilterOperator::AtMost, iso_date(until)),
                FilterClause::state_is(MembershipState::Active),
            ],
        )
    }

    pub fn filter(&self) -> &[FilterClause] {
        match self {
            NavigationRequest::OpenFilteredList(view) => &view.filter,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            NavigationRequest::OpenFilteredList(view) => &view.display_name,
        }
    }
}

/// The dashboard's list shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipShortcut {
    Active,
    Expired,
    Suspended,
    AboutToExpire,
}

impl MembershipShortcut {
    pub fn request(&self, today: NaiveDate) -> NavigationRequest {
        match self {
            MembershipShortcut::Active => NavigationRequest::active_memberships(),
            MembershipShortcut::Expired => NavigationRequest::expired_memberships(),
            MembershipShortcut::Suspended => NavigationRequest::suspended_memberships(),
            MembershipShortcut::AboutToExpire => NavigationRequest::about_to_expire(today),
        }
    }
}

impl FromStr for MembershipShortcut {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(MembershipShortcut::Active),
            "expired" => Ok(MembershipShortcut::Expired),
            "suspended" => Ok(MembershipShortcut::Suspended),
            "about-to-expire" => Ok(MembershipShortcut::AboutToExpire),
            other => Err(format!("unknown membership shortcut '{}'", other)),
        }
    }
}

fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
