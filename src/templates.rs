// Bring in Askama templating
use askama::Template;

// Import the display model from search.rs
use crate::search::SearchResult;

// Define a template struct that references index.html
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub results: &'a [SearchResult], // Most recent successful result list
    pub error: Option<String>,       // Localized message, when there is one
    pub stylesheet: &'static str,    // Path to CSS file
}

impl<'a> IndexTemplate<'a> {
    // Helper to create an IndexTemplate from the current result list
    pub fn new(results: &'a [SearchResult], error: Option<String>) -> Self {
        Self {
            results,
            error,
            stylesheet: "/dishes.css",
        }
    }
}
