//! Situational context buckets and the context matcher
//!
//! A preference remembers the situation it was learned in (amount bucket,
//! weekday, time of day). The matcher scores how closely a transaction's
//! situation resembles that record, so a "STARBUCKS on weekday mornings is
//! Coffee" correction does not bleed into a Saturday-night charge.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Coarse amount bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmountRange {
    #[serde(rename = "0-50")]
    UpTo50,
    #[serde(rename = "50-100")]
    UpTo100,
    #[serde(rename = "100-500")]
    UpTo500,
    #[serde(rename = "500+")]
    Over500,
}

impl AmountRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UpTo50 => "0-50",
            Self::UpTo100 => "50-100",
            Self::UpTo500 => "100-500",
            Self::Over500 => "500+",
        }
    }

    /// Bucket an amount at capture time
    pub fn from_amount(amount: f64) -> Self {
        if amount <= 50.0 {
            Self::UpTo50
        } else if amount <= 100.0 {
            Self::UpTo100
        } else if amount <= 500.0 {
            Self::UpTo500
        } else {
            Self::Over500
        }
    }

    /// Whether an amount falls inside this bucket's range
    pub fn contains(&self, amount: f64) -> bool {
        match self {
            Self::UpTo50 => (0.0..=50.0).contains(&amount),
            Self::UpTo100 => amount > 50.0 && amount <= 100.0,
            Self::UpTo500 => amount > 100.0 && amount <= 500.0,
            Self::Over500 => amount > 500.0,
        }
    }
}

impl std::str::FromStr for AmountRange {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "0-50" => Ok(Self::UpTo50),
            "50-100" => Ok(Self::UpTo100),
            "100-500" => Ok(Self::UpTo500),
            "500+" => Ok(Self::Over500),
            _ => Err(format!("Unknown amount range: {}", s)),
        }
    }
}

impl std::fmt::Display for AmountRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Time-of-day band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    /// 06:00-11:59
    Morning,
    /// 12:00-16:59
    Afternoon,
    /// 17:00-21:59
    Evening,
    /// 22:00-05:59
    Night,
}

impl TimeOfDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }

    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            17..=21 => Self::Evening,
            _ => Self::Night,
        }
    }

    pub fn contains_hour(&self, hour: u32) -> bool {
        Self::from_hour(hour) == *self
    }
}

impl std::str::FromStr for TimeOfDay {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morning" => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            "evening" => Ok(Self::Evening),
            "night" => Ok(Self::Night),
            _ => Err(format!("Unknown time of day: {}", s)),
        }
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Situational context recorded with a preference.
///
/// Every dimension is optional; an empty context places no constraint on
/// matching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceContext {
    pub amount_range: Option<AmountRange>,
    /// Weekday with Monday = 0
    pub day_of_week: Option<u8>,
    pub time_of_day: Option<TimeOfDay>,
}

impl PreferenceContext {
    pub fn is_empty(&self) -> bool {
        self.amount_range.is_none() && self.day_of_week.is_none() && self.time_of_day.is_none()
    }

    /// Capture the context of a transaction.
    ///
    /// Statement rows carry no time component, so date-only transactions
    /// arrive here as midnight: a real weekday and the night band.
    pub fn capture(amount: f64, when: Option<NaiveDateTime>) -> Self {
        Self {
            amount_range: Some(AmountRange::from_amount(amount)),
            day_of_week: when.map(|w| w.weekday().num_days_from_monday() as u8),
            time_of_day: when.map(|w| TimeOfDay::from_hour(w.hour())),
        }
    }

    /// Merge another context in, first-write-wins: dimensions already
    /// recorded are left alone, missing ones are filled from `other`.
    pub fn merge(&mut self, other: &Self) {
        if self.amount_range.is_none() {
            self.amount_range = other.amount_range;
        }
        if self.day_of_week.is_none() {
            self.day_of_week = other.day_of_week;
        }
        if self.time_of_day.is_none() {
            self.time_of_day = other.time_of_day;
        }
    }
}

/// Score how well a transaction's situation matches a recorded context.
///
/// Returns 1.0 for an empty context. Otherwise averages a binary match over
/// each dimension the context records; dimensions absent from the context
/// are skipped entirely, while a recorded dimension the transaction cannot
/// satisfy (no date, for instance) counts as a miss.
pub fn context_match(amount: f64, when: Option<NaiveDateTime>, context: &PreferenceContext) -> f64 {
    if context.is_empty() {
        return 1.0;
    }

    let mut matched = 0.0_f64;
    let mut factors = 0u32;

    if let Some(range) = context.amount_range {
        if range.contains(amount) {
            matched += 1.0;
        }
        factors += 1;
    }

    if let Some(day) = context.day_of_week {
        if when.is_some_and(|w| w.weekday().num_days_from_monday() as u8 == day) {
            matched += 1.0;
        }
        factors += 1;
    }

    if let Some(band) = context.time_of_day {
        if when.is_some_and(|w| band.contains_hour(w.hour())) {
            matched += 1.0;
        }
        factors += 1;
    }

    matched / factors as f64
}
