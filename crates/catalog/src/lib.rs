//! # Catalog Crate
//!
//! Loads the song catalog and turns it into a [`CandidateTable`].
//!
//! ## Main Components
//!
//! - **types**: SongRecord, CandidateItem, CandidateTable
//! - **parser**: Parse the catalog CSV into records, validating the header
//! - **table**: Embed every mood description once and build the table
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::CandidateTable;
//! use encoder::HashEmbedder;
//! use std::path::Path;
//!
//! let table = CandidateTable::load_from_file(Path::new("data/songs.csv"), &HashEmbedder::new())?;
//! println!("{} songs, dimension {:?}", table.len(), table.dimension());
//! ```

pub mod error;
pub mod parser;
pub mod table;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use parser::{REQUIRED_COLUMNS, parse_songs, parse_songs_str};
pub use types::{CandidateItem, CandidateTable, SongId, SongRecord};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table() {
        let table = CandidateTable::new();
        assert_eq!(table.len(), 0);
        assert!(table.is_empty());
        assert!(table.get(1).is_none());
    }

    #[test]
    fn test_get_by_id() {
        let record = SongRecord {
            id: 7,
            title: "Dynamite".to_string(),
            artist: "BTS".to_string(),
            mood: "upbeat disco".to_string(),
        };
        let table =
            CandidateTable::from_items(vec![CandidateItem::new(record, vec![0.5, 0.5])]).unwrap();

        let item = table.get(7).unwrap();
        assert_eq!(item.artist, "BTS");
        assert_eq!(table.dimension(), Some(2));
        assert_eq!(table.iter().count(), 1);
    }
}
