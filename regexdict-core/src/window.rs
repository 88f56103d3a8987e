// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Validated gap bound for the proximity builders.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PatternError;

/// Largest permitted number of characters between anchor and trigger
pub const MAX_WINDOW: u32 = 150;

/// Window used when the caller does not provide one
pub const DEFAULT_WINDOW: u32 = MAX_WINDOW;

/// Maximum count of arbitrary characters allowed between the two groups of
/// a proximity pattern. Always within `0..=MAX_WINDOW`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct WindowSpec(u32);

impl WindowSpec {
    pub fn new(chars: u32) -> Result<Self, PatternError> {
        if chars > MAX_WINDOW {
            return Err(PatternError::WindowOutOfRange {
                value: i128::from(chars),
                max: MAX_WINDOW,
            });
        }
        Ok(Self(chars))
    }

    pub fn chars(self) -> u32 {
        self.0
    }
}

impl Default for WindowSpec {
    fn default() -> Self {
        Self(DEFAULT_WINDOW)
    }
}

impl TryFrom<i64> for WindowSpec {
    type Error = PatternError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let chars = u32::try_from(value).map_err(|_| PatternError::WindowOutOfRange {
            value: i128::from(value),
            max: MAX_WINDOW,
        })?;
        Self::new(chars)
    }
}

impl From<WindowSpec> for u32 {
    fn from(window: WindowSpec) -> Self {
        window.0
    }
}

impl FromStr for WindowSpec {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value = match trimmed.parse::<i128>() {
            Ok(value) => value,
            // All digits but too long even for i128
            Err(_) if is_integer_literal(trimmed) => {
                if trimmed.starts_with('-') {
                    i128::MIN
                } else {
                    i128::MAX
                }
            }
            Err(_) => return Err(PatternError::InvalidWindow(trimmed.to_string())),
        };

        let chars = u32::try_from(value)
            .map_err(|_| PatternError::WindowOutOfRange {
                value,
                max: MAX_WINDOW,
            })?;
        Self::new(chars)
    }
}

fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for WindowSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
