//! Canonical book record shared by every provider
//!
//! Providers disagree on field names, nesting and presence. Every adapter maps
//! its raw result items into a [`BookRecord`], filling missing fields with the
//! placeholders defined here so display code never has to check for absence.

use serde::Serialize;

pub const TITLE_PLACEHOLDER: &str = "Title not available";
pub const AUTHOR_PLACEHOLDER: &str = "Author not available";
pub const DATE_PLACEHOLDER: &str = "Date not available";
pub const PUBLISHER_PLACEHOLDER: &str = "Publisher not available";
pub const CATEGORY_PLACEHOLDER: &str = "Category not available";
pub const LANGUAGE_PLACEHOLDER: &str = "Language not available";
pub const LINK_PLACEHOLDER: &str = "Link not available";

/// Normalized, provider-agnostic book metadata
///
/// Fields are private: a record is built once by [`BookRecordBuilder`] and is
/// read-only afterwards.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct BookRecord {
    title: String,
    authors: Vec<String>,
    published_date: String,
    publisher: String,
    page_count: u32,
    categories: Vec<String>,
    language: String,
    preview_link: String,
}

impl BookRecord {
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Never empty.
    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    pub fn published_date(&self) -> &str {
        &self.published_date
    }

    pub fn publisher(&self) -> &str {
        &self.publisher
    }

    /// `0` when the provider did not report a page count.
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Never empty.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn preview_link(&self) -> &str {
        &self.preview_link
    }
}

/// Collects optional provider fields and resolves placeholders on `build`
///
/// Empty strings and empty lists count as missing.
#[derive(Debug, Default, Clone)]
pub struct BookRecordBuilder {
    title: Option<String>,
    authors: Option<Vec<String>>,
    published_date: Option<String>,
    publisher: Option<String>,
    page_count: Option<u32>,
    categories: Option<Vec<String>>,
    language: Option<String>,
    preview_link: Option<String>,
}

impl BookRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub fn authors(mut self, authors: Option<Vec<String>>) -> Self {
        self.authors = authors;
        self
    }

    pub fn published_date(mut self, published_date: Option<String>) -> Self {
        self.published_date = published_date;
        self
    }

    pub fn publisher(mut self, publisher: Option<String>) -> Self {
        self.publisher = publisher;
        self
    }

    pub fn page_count(mut self, page_count: Option<u32>) -> Self {
        self.page_count = page_count;
        self
    }

    pub fn categories(mut self, categories: Option<Vec<String>>) -> Self {
        self.categories = categories;
        self
    }

    pub fn language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    pub fn preview_link(mut self, preview_link: Option<String>) -> Self {
        self.preview_link = preview_link;
        self
    }

    pub fn build(self) -> BookRecord {
        BookRecord {
            title: text_or(self.title, TITLE_PLACEHOLDER),
            authors: list_or(self.authors, AUTHOR_PLACEHOLDER),
            published_date: text_or(self.published_date, DATE_PLACEHOLDER),
            publisher: text_or(self.publisher, PUBLISHER_PLACEHOLDER),
            page_count: self.page_count.unwrap_or(0),
            categories: list_or(self.categories, CATEGORY_PLACEHOLDER),
            language: text_or(self.language, LANGUAGE_PLACEHOLDER),
            preview_link: text_or(self.preview_link, LINK_PLACEHOLDER),
        }
    }
}

fn text_or(value: Option<String>, placeholder: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| placeholder.to_string())
}

fn list_or(values: Option<Vec<String>>, placeholder: &str) -> Vec<String> {
    let values: Vec<String> = values
        .unwrap_or_default()
        .into_iter()
        .filter(|v| !v.trim().is_empty())
        .collect();

    if values.is_empty() {
        vec![placeholder.to_string()]
    } else {
        values
    }
}
