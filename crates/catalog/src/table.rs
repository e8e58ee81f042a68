//! CandidateTable building: parse, embed every mood once, validate.

use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::{CandidateItem, CandidateTable, SongRecord};
use encoder::Embedder;
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument};

impl CandidateTable {
    /// Load the catalog CSV and embed it.
    ///
    /// This is the main entry point at process start.
    ///
    /// Steps:
    /// 1. Parse the file (header is validated before any row)
    /// 2. Embed every mood description in parallel
    /// 3. Check that all embeddings share one length
    #[instrument(skip(embedder), fields(backend = embedder.name()))]
    pub fn load_from_file<E>(path: &Path, embedder: &E) -> Result<Self>
    where
        E: Embedder + ?Sized,
    {
        let start = Instant::now();
        let records = parser::parse_songs(path)?;
        info!("Parsed {} songs from {}", records.len(), path.display());

        let table = Self::build(records, embedder)?;
        info!(
            "Built candidate table: {} songs, dimension {:?}, in {:?}",
            table.len(),
            table.dimension(),
            start.elapsed()
        );
        Ok(table)
    }

    /// Embed already-parsed records into a table.
    ///
    /// Rayon's `par_iter().map().collect()` keeps the input order, so the
    /// table order always matches the file order.
    pub fn build<E>(records: Vec<SongRecord>, embedder: &E) -> Result<Self>
    where
        E: Embedder + ?Sized,
    {
        let items: Vec<CandidateItem> = records
            .into_par_iter()
            .map(|record| {
                let embedding = embedder
                    .embed(&record.mood)
                    .map_err(|source| CatalogError::Embedding {
                        id: record.id,
                        source,
                    })?;
                Ok(CandidateItem::new(record, embedding))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_items(items)
    }

    /// Assemble a table from items whose embeddings are already known.
    ///
    /// Fails if the items disagree on embedding length.
    pub fn from_items(items: Vec<CandidateItem>) -> Result<Self> {
        let dimension = items.first().map(|item| item.embedding.len());

        if let Some(expected) = dimension {
            if let Some(bad) = items.iter().find(|item| item.embedding.len() != expected) {
                return Err(CatalogError::InconsistentDimension {
                    id: bad.id,
                    expected,
                    found: bad.embedding.len(),
                });
            }
        }

        debug!("Assembled table of {} items", items.len());
        Ok(Self { items, dimension })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoder::{EncodingError, HashEmbedder};

    fn records() -> Vec<SongRecord> {
        vec![
            SongRecord {
                id: 1,
                title: "Clair de Lune".to_string(),
                artist: "Debussy".to_string(),
                mood: "dreamy gentle piano".to_string(),
            },
            SongRecord {
                id: 2,
                title: "Thunderstruck".to_string(),
                artist: "AC/DC".to_string(),
                mood: "loud energetic rock".to_string(),
            },
        ]
    }

    struct BrokenEmbedder;

    impl Embedder for BrokenEmbedder {
        fn name(&self) -> &str {
            "broken"
        }

        fn embed(&self, _text: &str) -> encoder::Result<Vec<f32>> {
            Err(EncodingError::unavailable("broken", "model not loaded"))
        }
    }

    #[test]
    fn test_build_keeps_order_and_dimension() {
        let embedder = HashEmbedder::new().with_dimensions(32);
        let table = CandidateTable::build(records(), &embedder).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.dimension(), Some(32));
        assert_eq!(table.items()[0].title, "Clair de Lune");
        assert_eq!(table.items()[1].id, 2);
        assert_eq!(
            table.items()[0].embedding,
            embedder.embed("dreamy gentle piano").unwrap()
        );
    }

    #[test]
    fn test_build_empty() {
        let table = CandidateTable::build(Vec::new(), &HashEmbedder::new()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.dimension(), None);
    }

    #[test]
    fn test_embedding_failure_aborts_load() {
        let err = CandidateTable::build(records(), &BrokenEmbedder).unwrap_err();
        assert!(matches!(err, CatalogError::Embedding { .. }));
    }

    #[test]
    fn test_inconsistent_dimension_rejected() {
        let mut recs = records().into_iter();
        let items = vec![
            CandidateItem::new(recs.next().unwrap(), vec![1.0, 0.0]),
            CandidateItem::new(recs.next().unwrap(), vec![1.0, 0.0, 0.0]),
        ];
        assert!(matches!(
            CandidateTable::from_items(items),
            Err(CatalogError::InconsistentDimension { id: 2, expected: 2, found: 3 })
        ));
    }

    #[test]
    fn test_deserialize_validates_dimension() {
        let json = r#"[
            {"id": 1, "title": "A", "artist": "X", "mood": "calm", "embedding": [1.0, 0.0]},
            {"id": 2, "title": "B", "artist": "Y", "mood": "loud", "embedding": [1.0]}
        ]"#;
        assert!(serde_json::from_str::<CandidateTable>(json).is_err());
    }

    #[test]
    fn test_serialized_table_loads_back() {
        let table = CandidateTable::build(records(), &HashEmbedder::new().with_dimensions(8)).unwrap();
        let json = serde_json::to_string(&table).unwrap();

        let restored: CandidateTable = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.dimension(), Some(8));
        assert_eq!(restored.items(), table.items());
    }
}
