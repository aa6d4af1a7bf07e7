//! Quick-note phrases a technician can tap onto the visit notes.
//!
//! The notes buffer belongs to the caller; these helpers only append to it.

use std::{fmt, str::FromStr};

use crate::error::CoolantError;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum QuickNote {
    AddedPhBoost,
    AddedFungicide,
    AddedDefoamer,
    RecommendDcr,
}

impl QuickNote {
    pub const ALL: [QuickNote; 4] = [
        QuickNote::AddedPhBoost,
        QuickNote::AddedFungicide,
        QuickNote::AddedDefoamer,
        QuickNote::RecommendDcr,
    ];

    pub fn phrase(&self) -> &'static str {
        match self {
            QuickNote::AddedPhBoost => "Added pH Boost",
            QuickNote::AddedFungicide => "Added fungicide",
            QuickNote::AddedDefoamer => "Added Defoamer",
            QuickNote::RecommendDcr => "Recommend DCR",
        }
    }

    /// Short command-line name.
    pub fn key(&self) -> &'static str {
        match self {
            QuickNote::AddedPhBoost => "ph-boost",
            QuickNote::AddedFungicide => "fungicide",
            QuickNote::AddedDefoamer => "defoamer",
            QuickNote::RecommendDcr => "dcr",
        }
    }

    pub fn from_index(index: usize) -> Result<Self, CoolantError> {
        QuickNote::ALL
            .get(index)
            .copied()
            .ok_or_else(|| CoolantError::UnknownQuickNote(index.to_string()))
    }
}

impl fmt::Display for QuickNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.phrase())
    }
}

impl FromStr for QuickNote {
    type Err = CoolantError;

    /// Accepts the short key, the full phrase (any case) or a zero-based index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(index) = s.parse::<usize>() {
            return QuickNote::from_index(index);
        }
        QuickNote::ALL
            .into_iter()
            .find(|note| note.key() == s.to_ascii_lowercase() || note.phrase().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoolantError::UnknownQuickNote(s.to_string()))
    }
}

/// Append `note` to the notes buffer as `"<phrase>. "`.
pub fn append_quick_note(buffer: &mut String, note: QuickNote) {
    if !buffer.is_empty() && !buffer.ends_with(' ') {
        buffer.push(' ');
    }
    buffer.push_str(note.phrase());
    buffer.push_str(". ");
}

/// Free text followed by each quick note in order.
pub fn compose_notes(free_text: Option<&str>, quick: &[QuickNote]) -> String {
    let mut buffer = free_text.map(str::trim).unwrap_or_default().to_string();
    for note in quick {
        append_quick_note(&mut buffer, *note);
    }
    buffer.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_accumulates_phrases() {
        let mut buffer = String::new();
        append_quick_note(&mut buffer, QuickNote::AddedPhBoost);
        append_quick_note(&mut buffer, QuickNote::RecommendDcr);
        assert_eq!(buffer, "Added pH Boost. Recommend DCR. ");
    }

    #[test]
    fn compose_keeps_free_text_first() {
        let notes = compose_notes(Some("Tramp oil on surface"), &[QuickNote::AddedDefoamer]);
        assert_eq!(notes, "Tramp oil on surface Added Defoamer.");
    }

    #[test]
    fn compose_without_anything_is_empty() {
        assert_eq!(compose_notes(None, &[]), "");
    }

    #[test]
    fn parse_by_key_phrase_and_index() {
        assert_eq!("fungicide".parse::<QuickNote>().unwrap(), QuickNote::AddedFungicide);
        assert_eq!("added ph boost".parse::<QuickNote>().unwrap(), QuickNote::AddedPhBoost);
        assert_eq!("3".parse::<QuickNote>().unwrap(), QuickNote::RecommendDcr);
    }

    #[test]
    fn index_past_the_row_is_rejected() {
        assert_eq!(
            QuickNote::from_index(4),
            Err(CoolantError::UnknownQuickNote("4".to_string()))
        );
        assert!("5".parse::<QuickNote>().is_err());
        assert!("coffee".parse::<QuickNote>().is_err());
    }
}
