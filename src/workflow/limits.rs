use serde::{Deserialize, Serialize};

pub const DEFAULT_ROW_COUNT: u32 = 3;
pub const MIN_ROW_COUNT: u32 = 1;
pub const MAX_ROW_COUNT: u32 = 20;
pub const MAX_TOTAL_COUNT: u32 = 50;

fn default_row_count() -> u32 {
    DEFAULT_ROW_COUNT
}

fn min_row_count() -> u32 {
    MIN_ROW_COUNT
}

fn max_row_count() -> u32 {
    MAX_ROW_COUNT
}

fn max_total_count() -> u32 {
    MAX_TOTAL_COUNT
}

/// Per-row and per-batch quiz count limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WorkflowLimits {
    #[serde(default = "default_row_count")]
    pub default_row_count: u32,
    #[serde(default = "min_row_count")]
    pub min_row_count: u32,
    #[serde(default = "max_row_count")]
    pub max_row_count: u32,
    #[serde(default = "max_total_count")]
    pub max_total_count: u32,
}

impl Default for WorkflowLimits {
    fn default() -> Self {
        Self {
            default_row_count: DEFAULT_ROW_COUNT,
            min_row_count: MIN_ROW_COUNT,
            max_row_count: MAX_ROW_COUNT,
            max_total_count: MAX_TOTAL_COUNT,
        }
    }
}

impl WorkflowLimits {
    pub fn clamp_count(&self, value: i64) -> u32 {
        value.clamp(i64::from(self.min_row_count), i64::from(self.max_row_count)) as u32
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.min_row_count == 0 {
            return Err("`limits.min_row_count` must be at least 1".to_string());
        }
        if self.min_row_count > self.max_row_count {
            return Err(format!(
                "`limits.min_row_count` ({}) must not exceed `limits.max_row_count` ({})",
                self.min_row_count, self.max_row_count
            ));
        }
        if !(self.min_row_count..=self.max_row_count).contains(&self.default_row_count) {
            return Err(format!(
                "`limits.default_row_count` ({}) must lie within {}..={}",
                self.default_row_count, self.min_row_count, self.max_row_count
            ));
        }
        if self.max_total_count < self.min_row_count {
            return Err(format!(
                "`limits.max_total_count` ({}) must allow at least one row",
                self.max_total_count
            ));
        }
        Ok(())
    }
}
