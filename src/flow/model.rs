//! Session payload types for the onboarding steps.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

/// An identity field the profile step may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    FullName,
    Email,
    Age,
    Gender,
}

/// A status tag the user can attach to their profile.
///
/// `None` is exclusive: selecting it clears every other tag, and selecting
/// any other tag removes `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTag {
    Student,
    Resident,
    Retired,
    NonResident,
    Veteran,
    None,
}

/// Profile step payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileData {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub statuses: Vec<StatusTag>,
}

impl ProfileData {
    /// Raw value of a field, for required-field checks.
    pub fn field(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::FullName => &self.full_name,
            ProfileField::Email => &self.email,
            ProfileField::Age => &self.age,
            ProfileField::Gender => &self.gender,
        }
    }

    /// Toggle a status tag, enforcing `None` exclusivity.
    pub fn toggle_status(&mut self, tag: StatusTag) {
        if self.statuses.contains(&tag) {
            if tag == StatusTag::None {
                self.statuses.clear();
            } else {
                self.statuses.retain(|t| *t != tag);
            }
        } else if tag == StatusTag::None {
            self.statuses = vec![StatusTag::None];
        } else {
            self.statuses.retain(|t| *t != StatusTag::None);
            self.statuses.push(tag);
        }
    }
}

/// Highest education level reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    LessThanTenth,
    Tenth,
    Intermediate,
    Graduation,
    PostGraduate,
}

impl EducationLevel {
    /// Whether this level collects a degree name. The degree is optional
    /// either way; it never blocks advancement.
    pub fn collects_degree(&self) -> bool {
        matches!(self, Self::Graduation | Self::PostGraduate)
    }
}

/// Education step payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EducationData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<EducationLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
}

/// A month/year point, ordered by `(year, month)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthYear {
    pub year: i32,
    /// 1-based calendar month.
    pub month: u32,
}

impl MonthYear {
    /// Parse raw form values. Returns `None` unless the month is in 1..=12
    /// and the year parses to a number.
    pub fn parse(month: &str, year: &str) -> Option<MonthYear> {
        let month: u32 = month.trim().parse().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        let year: i32 = year.trim().parse().ok()?;
        Some(MonthYear { year, month })
    }

    /// The current month/year.
    pub fn now() -> MonthYear {
        let now = Utc::now();
        MonthYear {
            year: now.year(),
            month: now.month(),
        }
    }

    /// Whole months from `self` to `end` (zero if `end` precedes `self`).
    ///
    /// Years are unvalidated form input, so the diff is taken in i64 to
    /// keep absurd values from overflowing.
    pub fn months_until(&self, end: MonthYear) -> u32 {
        let diff = (end.year as i64 - self.year as i64) * 12
            + (end.month as i64 - self.month as i64);
        diff.clamp(0, u32::MAX as i64) as u32
    }
}

/// Elapsed time of one or more experience entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceDuration {
    pub years: u32,
    pub months: u32,
}

impl ExperienceDuration {
    fn from_months(total: u32) -> Self {
        Self {
            years: total / 12,
            months: total % 12,
        }
    }
}

/// One job-history record.
///
/// Date fields hold raw form input; they are parsed on validation and on
/// duration reads, never cached as a separate source of truth.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_city: Option<String>,
    #[serde(default)]
    pub start_month: String,
    #[serde(default)]
    pub start_year: String,
    #[serde(default)]
    pub end_month: String,
    #[serde(default)]
    pub end_year: String,
    #[serde(default)]
    pub is_current: bool,
}

impl ExperienceEntry {
    pub fn start(&self) -> Option<MonthYear> {
        MonthYear::parse(&self.start_month, &self.start_year)
    }

    pub fn end(&self) -> Option<MonthYear> {
        MonthYear::parse(&self.end_month, &self.end_year)
    }

    /// Duration from start to end (or now, for a current job), recomputed
    /// from the source dates on every read.
    pub fn duration(&self) -> Option<ExperienceDuration> {
        let start = self.start()?;
        let end = if self.is_current {
            MonthYear::now()
        } else {
            self.end()?
        };
        Some(ExperienceDuration::from_months(start.months_until(end)))
    }
}

/// Whether the user has declared any work history.
///
/// One canonical field instead of a "no experience" flag alongside a
/// possibly-empty entry list: entries only count once experience has been
/// declared, and declaring no experience clears the entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceDeclaration {
    Unset,
    NoExperience,
    HasExperience,
}

impl Default for ExperienceDeclaration {
    fn default() -> Self {
        Self::Unset
    }
}

/// Experience step payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperienceData {
    #[serde(default)]
    pub declaration: ExperienceDeclaration,
    #[serde(default)]
    pub entries: Vec<ExperienceEntry>,
}

impl ExperienceData {
    /// Sum of all entry durations, with excess months carried into years.
    pub fn total_duration(&self) -> ExperienceDuration {
        let total: u32 = self
            .entries
            .iter()
            .filter_map(|e| e.duration())
            .map(|d| d.years * 12 + d.months)
            .sum();
        ExperienceDuration::from_months(total)
    }
}

/// One selectable job preference. The label is an i18n key; the core never
/// sees display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPreference {
    pub id: String,
    pub label_key: String,
}

/// Preferences step payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferenceData {
    #[serde(default)]
    pub selected: Vec<JobPreference>,
}

impl PreferenceData {
    /// Toggle a preference. Selecting past `max_selections` is a no-op;
    /// deselecting is always allowed. Returns whether the set changed.
    pub fn toggle(&mut self, preference: JobPreference, max_selections: usize) -> bool {
        if let Some(pos) = self.selected.iter().position(|p| p.id == preference.id) {
            self.selected.remove(pos);
            return true;
        }
        if self.selected.len() >= max_selections {
            tracing::warn!(
                max = max_selections,
                id = %preference.id,
                "Preference selection limit reached, ignoring"
            );
            return false;
        }
        self.selected.push(preference);
        true
    }
}
