//! Transformation functions for the Google Books volumes API

use serde::{Deserialize, Serialize};

use crate::query::{MatchMode, SearchRequest};
use crate::record::{BookRecord, BookRecordBuilder};

/// Response from `GET /books/v1/volumes`
///
/// `items` is omitted entirely when nothing matched.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct GoogleVolumesResponse {
    #[serde(rename = "totalItems", default)]
    pub total_items: Option<u64>,
    #[serde(default)]
    pub items: Option<Vec<GoogleVolume>>,
}

/// Single volume entry
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct GoogleVolume {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "volumeInfo", default)]
    pub volume_info: GoogleVolumeInfo,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct GoogleVolumeInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Option<Vec<String>>,
    #[serde(rename = "publishedDate", default)]
    pub published_date: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(rename = "pageCount", default)]
    pub page_count: Option<u32>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(rename = "previewLink", default)]
    pub preview_link: Option<String>,
}

/// Builds the `q` parameter for the requested match mode
///
/// Exact searches are restricted to the title field and quoted as a phrase.
pub fn build_query(query: &str, match_mode: MatchMode) -> String {
    match match_mode {
        MatchMode::Exact => format!("intitle:\"{query}\""),
        MatchMode::Similar => query.to_string(),
    }
}

/// Query string parameters for a volumes search
pub fn query_params(request: &SearchRequest) -> Vec<(&'static str, String)> {
    vec![
        ("q", build_query(request.query(), request.match_mode())),
        ("maxResults", request.max_results().to_string()),
        ("langRestrict", request.language().to_string()),
    ]
}

/// Convert a single volume into a canonical record
pub fn transform_volume(volume: GoogleVolume) -> BookRecord {
    let info = volume.volume_info;

    BookRecordBuilder::new()
        .title(info.title)
        .authors(info.authors)
        .published_date(info.published_date)
        .publisher(info.publisher)
        .page_count(info.page_count)
        .categories(info.categories)
        .language(info.language)
        .preview_link(info.preview_link)
        .build()
}

/// Convert every volume of a response, preserving order
pub fn normalize(response: GoogleVolumesResponse) -> Vec<BookRecord> {
    response
        .items
        .unwrap_or_default()
        .into_iter()
        .map(transform_volume)
        .collect()
}
