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

//! Single-outstanding expansion requests.
//!
//! A coordinator admits one request at a time. Each admitted request gets a
//! [`RequestId`] and a cancellation token; callers may await it, cancel it
//! by id, or drop the ticket to abandon it. No retry and no timeout.

use parking_lot::Mutex;
use regexdict_core::tokenize;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{CategoryExpander, ExpansionError};

pub type RequestId = u64;

/// Result of a completed expansion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpansionOutcome {
    pub request_id: RequestId,
    pub category: String,
    /// Raw line returned by the provider
    pub expanded: String,
    /// `expanded` split into terms
    pub terms: Vec<String>,
}

#[derive(Debug)]
struct Outstanding {
    id: RequestId,
    token: CancellationToken,
}

type Slot = Arc<Mutex<Option<Outstanding>>>;

#[derive(Debug, Default)]
pub struct ExpansionCoordinator {
    next_id: AtomicU64,
    slot: Slot,
}

impl ExpansionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the slot for a new request.
    pub fn begin(&self, category: &str) -> Result<ExpansionTicket, ExpansionError> {
        let category = category.trim();
        if category.is_empty() {
            return Err(ExpansionError::EmptyCategory);
        }

        let mut slot = self.slot.lock();
        if let Some(current) = slot.as_ref() {
            debug!(outstanding = current.id, "Expansion already in flight");
            return Err(ExpansionError::Busy(current.id));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let token = CancellationToken::new();
        *slot = Some(Outstanding {
            id,
            token: token.clone(),
        });
        debug!(request_id = id, category, "Expansion admitted");

        Ok(ExpansionTicket {
            id,
            category: category.to_string(),
            token,
            slot: Arc::clone(&self.slot),
        })
    }

    /// Admit and run a request in one call.
    pub async fn expand<E>(
        &self,
        expander: &E,
        category: &str,
    ) -> Result<ExpansionOutcome, ExpansionError>
    where
        E: CategoryExpander + ?Sized,
    {
        self.begin(category)?.run(expander).await
    }

    pub fn outstanding(&self) -> Option<RequestId> {
        self.slot.lock().as_ref().map(|current| current.id)
    }

    /// Cancel the request with this id. False if it is not the outstanding one.
    pub fn cancel(&self, id: RequestId) -> bool {
        match self.slot.lock().as_ref() {
            Some(current) if current.id == id => {
                current.token.cancel();
                info!(request_id = id, "Expansion cancelled");
                true
            }
            _ => false,
        }
    }

    /// Cancel whatever is in flight.
    pub fn cancel_outstanding(&self) -> Option<RequestId> {
        let slot = self.slot.lock();
        let current = slot.as_ref()?;
        current.token.cancel();
        info!(request_id = current.id, "Expansion cancelled");
        Some(current.id)
    }
}

/// Admitted request. Dropping it frees the coordinator for the next one.
#[derive(Debug)]
pub struct ExpansionTicket {
    id: RequestId,
    category: String,
    token: CancellationToken,
    slot: Slot,
}

impl ExpansionTicket {
    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Run the expansion unless the request is cancelled first.
    pub async fn run<E>(self, expander: &E) -> Result<ExpansionOutcome, ExpansionError>
    where
        E: CategoryExpander + ?Sized,
    {
        let result = tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(ExpansionError::Cancelled(self.id)),
            result = expander.expand(&self.category) => result,
        };

        let expanded = match result {
            Ok(expanded) => expanded,
            Err(e) => {
                warn!(request_id = self.id, category = %self.category, "Expansion failed: {}", e);
                return Err(e);
            }
        };

        let terms = tokenize(&expanded);
        info!(
            request_id = self.id,
            category = %self.category,
            terms = terms.len(),
            "Expansion completed"
        );

        Ok(ExpansionOutcome {
            request_id: self.id,
            category: self.category.clone(),
            expanded,
            terms,
        })
    }
}

impl Drop for ExpansionTicket {
    fn drop(&mut self) {
        let mut slot = self.slot.lock();
        if slot.as_ref().is_some_and(|current| current.id == self.id) {
            *slot = None;
        }
    }
}
