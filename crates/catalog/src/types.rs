//! Core domain types for the song catalog.

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Identifier of a song: its 1-based row position in the catalog file.
pub type SongId = u32;

/// A catalog row as read from disk, before embedding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongRecord {
    pub id: SongId,
    pub title: String,
    pub artist: String,
    /// Free-text mood description; this is what gets embedded.
    pub mood: String,
}

/// A rankable song: the record plus its mood embedding.
///
/// The embedding is computed once when the table is built and never changes.
/// Scores are not stored here; ranking returns them alongside a borrow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateItem {
    pub id: SongId,
    pub title: String,
    pub artist: String,
    pub mood: String,
    pub embedding: Vec<f32>,
}

impl CandidateItem {
    pub fn new(record: SongRecord, embedding: Vec<f32>) -> Self {
        Self {
            id: record.id,
            title: record.title,
            artist: record.artist,
            mood: record.mood,
            embedding,
        }
    }
}

/// The ordered, read-only set of songs that ranking runs against.
///
/// Built once at startup (see [`CandidateTable::build`](crate::table)) and
/// shared behind an `Arc`; nothing mutates it after construction.
///
/// Serializes as its item list. Deserializing goes through
/// [`CandidateTable::from_items`], so a mixed-length table is rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<CandidateItem>", into = "Vec<CandidateItem>")]
pub struct CandidateTable {
    pub(crate) items: Vec<CandidateItem>,
    pub(crate) dimension: Option<usize>,
}

impl CandidateTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CandidateItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Embedding length shared by every item, or `None` for an empty table.
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    pub fn get(&self, id: SongId) -> Option<&CandidateItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CandidateItem> {
        self.items.iter()
    }
}

impl TryFrom<Vec<CandidateItem>> for CandidateTable {
    type Error = CatalogError;

    fn try_from(items: Vec<CandidateItem>) -> Result<Self, Self::Error> {
        Self::from_items(items)
    }
}

impl From<CandidateTable> for Vec<CandidateItem> {
    fn from(table: CandidateTable) -> Self {
        table.items
    }
}

impl<'a> IntoIterator for &'a CandidateTable {
    type Item = &'a CandidateItem;
    type IntoIter = std::slice::Iter<'a, CandidateItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
