//! Event snapshot files.
//!
//! ```json
//! {
//!   "event":    { "id": "...", "name": "Da Lat", "members": ["An", "Binh"], ... },
//!   "expenses": [ { "id": "...", "name": "Hotel", "payer": "common_fund", ... } ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use settleup_core::validation::validate_event;
use settleup_core::{Event, Expense};
use tracing::info;

use crate::error::{CliError, CliResult};

/// An event and its expenses, as exported by the calling application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub event: Event,

    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl Snapshot {
    /// Reads and validates a snapshot file.
    pub fn load(path: &Path) -> CliResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_json(&contents)?;

        info!(
            event = %snapshot.event.name,
            members = snapshot.event.members.len(),
            expenses = snapshot.expenses.len(),
            "Loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Parses a snapshot and checks the event itself (names, member count,
    /// contributions). Expenses are checked later by the calculators.
    pub fn from_json(contents: &str) -> CliResult<Self> {
        let snapshot: Snapshot = serde_json::from_str(contents)?;
        validate_event(&snapshot.event)?;
        Ok(snapshot)
    }
}
