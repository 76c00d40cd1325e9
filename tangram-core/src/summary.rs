//! The summary view: one `"<name>: <rotation>°"` entry per piece.
//!
//! Always rebuilt from piece state; never edited in place.

use std::fmt::{self, Display, Formatter};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::piece::{Piece, PieceId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
pub struct SummaryEntry {
    /// Piece identifier; empty for the placeholder
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
pub struct SummaryView {
    pub placeholder: String,
    /// One per piece, in enumeration order
    pub entries: Vec<SummaryEntry>,
    /// Value of the highlighted entry, if a piece is selected
    pub active: Option<String>,
}

impl SummaryView {
    pub fn build<'a>(
        placeholder: &str,
        pieces: impl IntoIterator<Item = &'a Piece>,
        selected: Option<&PieceId>,
    ) -> Self {
        let entries = pieces
            .into_iter()
            .map(|piece| SummaryEntry {
                value: piece.id.to_string(),
                label: piece.label(),
            })
            .collect();
        SummaryView {
            placeholder: placeholder.to_string(),
            entries,
            active: selected.map(|id| id.to_string()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, value: &str) -> Option<&SummaryEntry> {
        self.entries.iter().find(|e| e.value == value)
    }

    /// Placeholder followed by the piece entries, as rendered in a `<select>`.
    pub fn options(&self) -> impl Iterator<Item = SummaryEntry> + '_ {
        std::iter::once(SummaryEntry { value: String::new(), label: self.placeholder.clone() })
            .chain(self.entries.iter().cloned())
    }

    /// Value the control should show: the active entry, or the placeholder.
    pub fn value(&self) -> &str {
        self.active.as_deref().unwrap_or("")
    }
}

impl Display for SummaryView {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let lines = self
            .entries
            .iter()
            .map(|e| {
                let marker = if Some(&e.value) == self.active.as_ref() { '*' } else { ' ' };
                format!("{} {}", marker, e.label)
            })
            .join("\n");
        write!(f, "{}", lines)
    }
}
