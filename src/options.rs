use crate::consts::MAX_OFFSET_HOUR;
use serde::{Deserialize, Serialize};

/// How large the hour of a UTC offset may be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetHourPolicy {
    /// Hours above 23 are a range error.
    #[default]
    Strict,
    /// Any two-digit hour is accepted.
    Unconstrained,
}

impl OffsetHourPolicy {
    pub const fn allows(self, hours: u8) -> bool {
        match self {
            Self::Strict => hours <= MAX_OFFSET_HOUR,
            Self::Unconstrained => true,
        }
    }
}

/// Knobs for a [`Parser`](crate::Parser).
///
/// Deserializable, so it can sit inside an application's own config file:
///
/// ```
/// let options: isodate::ParseOptions =
///     serde_json::from_str(r#"{ "offset_hours": "unconstrained" }"#).unwrap();
/// assert_eq!(options.offset_hours, isodate::OffsetHourPolicy::Unconstrained);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub offset_hours: OffsetHourPolicy,
}

impl ParseOptions {
    pub const fn new() -> Self {
        Self {
            offset_hours: OffsetHourPolicy::Strict,
        }
    }

    #[must_use]
    pub const fn with_offset_hours(mut self, policy: OffsetHourPolicy) -> Self {
        self.offset_hours = policy;
        self
    }
}
