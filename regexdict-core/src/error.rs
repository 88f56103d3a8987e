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

//! Error types for pattern construction.

use thiserror::Error;

/// Errors raised at the builder boundary.
///
/// Empty inputs are not errors: builders return the empty-string sentinel
/// for those. Only parameters outside their documented domain end up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// Window bound above [`crate::MAX_WINDOW`] or below zero
    #[error("Window bound {value} is out of range (expected 0..={max})")]
    WindowOutOfRange { value: i128, max: u32 },

    /// Window bound that is not an integer at all
    #[error("Invalid window bound '{0}': expected an integer between 0 and 150")]
    InvalidWindow(String),
}

pub type Result<T> = std::result::Result<T, PatternError>;
