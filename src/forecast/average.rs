use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::extract::IterationRecord;

/// Iteration names the user picked for averaging.
///
/// Explicit state handed to [`average_estimate`]; insertion order is kept
/// and duplicates collapse.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IterationSelection {
    names: IndexSet<String>,
}

impl IterationSelection {
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Adds `name` when absent, removes it when present. Returns whether it is now selected.
    pub fn toggle(&mut self, name: &str) -> bool {
        if self.names.shift_remove(name) {
            false
        } else {
            self.names.insert(name.to_owned());
            true
        }
    }

    /// Drops names that no longer match any current record.
    pub fn retain_known(&mut self, records: &[IterationRecord]) {
        self.names
            .retain(|name| records.iter().any(|record| &record.name == name));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum AverageVelocity {
    /// The selection is empty.
    NothingSelected,
    /// Names are selected but none matches a current record.
    StaleSelection,
    Average { value: f64, matched: usize },
}

impl AverageVelocity {
    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Average { value, .. } => Some(value),
            Self::NothingSelected | Self::StaleSelection => None,
        }
    }
}

/// Mean estimate over the selected iterations.
#[must_use]
pub fn average_estimate(
    records: &[IterationRecord],
    selection: &IterationSelection,
) -> AverageVelocity {
    if selection.is_empty() {
        return AverageVelocity::NothingSelected;
    }

    let (sum, matched) = records
        .iter()
        .filter(|record| selection.contains(&record.name))
        .fold((0.0, 0usize), |(sum, count), record| {
            (sum + record.estimate, count + 1)
        });

    if matched == 0 {
        return AverageVelocity::StaleSelection;
    }
    AverageVelocity::Average {
        value: sum / matched as f64,
        matched,
    }
}
