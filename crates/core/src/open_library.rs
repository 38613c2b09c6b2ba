//! Transformation functions for the Open Library search API

use serde::{Deserialize, Serialize};

use crate::query::{SearchRequest, DEFAULT_LANGUAGE};
use crate::record::{BookRecord, BookRecordBuilder};

/// Site origin prepended to catalog keys to build preview links
pub const OPEN_LIBRARY_SITE: &str = "https://openlibrary.org";

/// Language code Open Library uses for English editions
const ENGLISH_FILTER: &str = "eng";

/// Response from `GET /search.json`
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct OpenLibrarySearchResponse {
    #[serde(rename = "numFound", default)]
    pub num_found: Option<u64>,
    #[serde(default)]
    pub docs: Vec<OpenLibraryDoc>,
}

/// Single search document
///
/// Publisher and language arrive as lists; only the first entry is kept.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct OpenLibraryDoc {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author_name: Option<Vec<String>>,
    #[serde(default)]
    pub first_publish_year: Option<i32>,
    #[serde(default)]
    pub publisher: Option<Vec<String>>,
    #[serde(default)]
    pub number_of_pages_median: Option<u32>,
    #[serde(default)]
    pub subject: Option<Vec<String>>,
    #[serde(default)]
    pub language: Option<Vec<String>>,
}

/// Query string parameters for a title search
///
/// Match mode has no equivalent here. Only the default language adds an
/// explicit filter; any other language is sent unfiltered.
pub fn query_params(request: &SearchRequest) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("title", request.query().to_string()),
        ("limit", request.max_results().to_string()),
    ];

    if request.language() == DEFAULT_LANGUAGE {
        params.push(("language", ENGLISH_FILTER.to_string()));
    }

    params
}

/// Preview link for a catalog key such as `/works/OL893415W`
pub fn preview_link(key: Option<&str>) -> Option<String> {
    key.filter(|k| !k.trim().is_empty())
        .map(|k| format!("{OPEN_LIBRARY_SITE}{k}"))
}

fn first(values: Option<Vec<String>>) -> Option<String> {
    values.and_then(|v| v.into_iter().next())
}

/// Convert a single search document into a canonical record
pub fn transform_doc(doc: OpenLibraryDoc) -> BookRecord {
    let link = preview_link(doc.key.as_deref());

    BookRecordBuilder::new()
        .title(doc.title)
        .authors(doc.author_name)
        .published_date(doc.first_publish_year.map(|year| year.to_string()))
        .publisher(first(doc.publisher))
        .page_count(doc.number_of_pages_median)
        .categories(doc.subject)
        .language(first(doc.language))
        .preview_link(link)
        .build()
}

/// Convert every document of a response, preserving order
pub fn normalize(response: OpenLibrarySearchResponse) -> Vec<BookRecord> {
    response.docs.into_iter().map(transform_doc).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::MatchMode;
    use crate::record::*;

    #[test]
    fn test_query_params_english_adds_filter() {
        let request = SearchRequest::new("Dune", MatchMode::Similar, 5, "en").unwrap();

        assert_eq!(
            query_params(&request),
            vec![
                ("title", "Dune".to_string()),
                ("limit", "5".to_string()),
                ("language", "eng".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_params_other_language_is_unfiltered() {
        let request = SearchRequest::new("Dune", MatchMode::Similar, 5, "fr").unwrap();
        let params = query_params(&request);

        assert_eq!(params.len(), 2);
        assert!(params.iter().all(|(name, _)| *name != "language"));
    }

    #[test]
    fn test_query_params_ignore_match_mode() {
        let exact = SearchRequest::new("Dune", MatchMode::Exact, 5, "en").unwrap();
        let similar = SearchRequest::new("Dune", MatchMode::Similar, 5, "en").unwrap();

        assert_eq!(query_params(&exact), query_params(&similar));
    }

    #[test]
    fn test_preview_link() {
        assert_eq!(
            preview_link(Some("/works/OL893415W")),
            Some("https://openlibrary.org/works/OL893415W".to_string())
        );
        assert_eq!(preview_link(Some("")), None);
        assert_eq!(preview_link(None), None);
    }

    #[test]
    fn test_normalize_full_doc() {
        let response: OpenLibrarySearchResponse = serde_json::from_value(serde_json::json!({
            "numFound": 1,
            "docs": [{
                "key": "/works/OL893415W",
                "title": "Dune",
                "author_name": ["Frank Herbert"],
                "first_publish_year": 1965,
                "publisher": ["Chilton Books", "Ace"],
                "number_of_pages_median": 604,
                "subject": ["Science fiction", "Dune (Imaginary place)"],
                "language": ["eng", "spa"]
            }]
        }))
        .unwrap();

        let records = normalize(response);

        assert_eq!(records.len(), 1);
        let dune = &records[0];
        assert_eq!(dune.title(), "Dune");
        assert_eq!(dune.authors(), &["Frank Herbert".to_string()]);
        assert_eq!(dune.published_date(), "1965");
        assert_eq!(dune.publisher(), "Chilton Books");
        assert_eq!(dune.page_count(), 604);
        assert_eq!(dune.categories().len(), 2);
        assert_eq!(dune.language(), "eng");
        assert_eq!(
            dune.preview_link(),
            "https://openlibrary.org/works/OL893415W"
        );
    }

    #[test]
    fn test_normalize_sparse_doc() {
        let response: OpenLibrarySearchResponse = serde_json::from_value(serde_json::json!({
            "docs": [{
                "title": "Dune",
                "author_name": ["Frank Herbert"]
            }]
        }))
        .unwrap();

        let records = normalize(response);
        let dune = &records[0];

        assert_eq!(dune.title(), "Dune");
        assert_eq!(dune.authors(), &["Frank Herbert".to_string()]);
        assert_eq!(dune.published_date(), DATE_PLACEHOLDER);
        assert_eq!(dune.publisher(), PUBLISHER_PLACEHOLDER);
        assert_eq!(dune.page_count(), 0);
        assert_eq!(dune.categories(), &[CATEGORY_PLACEHOLDER.to_string()]);
        assert_eq!(dune.language(), LANGUAGE_PLACEHOLDER);
        assert_eq!(dune.preview_link(), LINK_PLACEHOLDER);
    }

    #[test]
    fn test_empty_publisher_list_uses_placeholder() {
        let doc = OpenLibraryDoc {
            publisher: Some(vec![]),
            language: Some(vec![]),
            ..Default::default()
        };

        let record = transform_doc(doc);

        assert_eq!(record.publisher(), PUBLISHER_PLACEHOLDER);
        assert_eq!(record.language(), LANGUAGE_PLACEHOLDER);
    }

    #[test]
    fn test_normalize_count_matches_docs() {
        for n in [0usize, 1, 4] {
            let response = OpenLibrarySearchResponse {
                num_found: Some(n as u64),
                docs: vec![OpenLibraryDoc::default(); n],
            };
            assert_eq!(normalize(response).len(), n);
        }
    }

    #[test]
    fn test_missing_docs_field() {
        let response: OpenLibrarySearchResponse =
            serde_json::from_str(r#"{"numFound": 0}"#).unwrap();
        assert!(normalize(response).is_empty());
    }
}
