use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizStatus {
    #[default]
    Draft,
    Active,
}

impl QuizStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            _ => Err("status must be one of: draft, active".to_string()),
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Draft => Self::Active,
            Self::Active => Self::Draft,
        }
    }
}

impl std::fmt::Display for QuizStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Today's local date in `YYYY-MM-DD` form.
pub fn today_release_date() -> String {
    chrono::Local::now()
        .date_naive()
        .format(RELEASE_DATE_FORMAT)
        .to_string()
}

pub fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), RELEASE_DATE_FORMAT).ok()
}
