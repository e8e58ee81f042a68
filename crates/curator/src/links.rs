//! Web-search links and the optional video lookup seam.

use crate::recommendation::Recommendation;
use serde::Serialize;
use url::form_urlencoded;

/// Search results page the generated links point at.
pub const SEARCH_BASE_URL: &str = "https://www.youtube.com/results?search_query=";

/// Build a search URL for `"{title} {artist}"`, form-encoded (spaces as `+`).
pub fn search_link(title: &str, artist: &str) -> String {
    let query = format!("{} {}", title.trim(), artist.trim());
    let encoded: String = form_urlencoded::byte_serialize(query.trim().as_bytes()).collect();
    format!("{SEARCH_BASE_URL}{encoded}")
}

/// Resolves a song to a playable/watchable link.
///
/// Implementations may call out to an external service. `None` means no
/// link was found; callers must carry on without one.
pub trait VideoResolver: Send + Sync {
    fn resolve(&self, title: &str, artist: &str) -> Option<String>;
}

/// Resolver that never leaves the process: always the search-results link.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchLinkResolver;

impl VideoResolver for SearchLinkResolver {
    fn resolve(&self, title: &str, artist: &str) -> Option<String> {
        Some(search_link(title, artist))
    }
}

/// A parsed recommendation ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CuratedRecommendation {
    /// 1-based position in the reply.
    pub rank: usize,
    pub recommendation: Recommendation,
    pub link: Option<String>,
}

/// Attach links to each recommendation.
///
/// Items whose title or artist is a placeholder get no link; searching for
/// "title unavailable" helps nobody.
pub fn curate(
    recommendations: Vec<Recommendation>,
    resolver: &dyn VideoResolver,
) -> Vec<CuratedRecommendation> {
    recommendations
        .into_iter()
        .enumerate()
        .map(|(i, recommendation)| {
            let link = if recommendation.is_identifiable() {
                resolver.resolve(&recommendation.title, &recommendation.artist)
            } else {
                None
            };
            CuratedRecommendation {
                rank: i + 1,
                recommendation,
                link,
            }
        })
        .collect()
}
