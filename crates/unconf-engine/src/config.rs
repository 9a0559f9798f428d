//! Engine settings shared by the CLI and the WASM bindings.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::clock::{parse_timezone, DEFAULT_TIMEZONE};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// IANA timezone used for slot labels, clash lines and `HH:mm` input.
    pub display_timezone: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            display_timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl EngineConfig {
    pub fn timezone(&self) -> Result<Tz> {
        parse_timezone(&self.display_timezone)
    }
}
