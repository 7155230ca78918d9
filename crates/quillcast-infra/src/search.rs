//! DuckDuckGo search adapter.
//!
//! Implements [`SearchClient`] against the DuckDuckGo Instant Answer JSON
//! API. Uses the injected shared HTTP client; searches have no side
//! effects and are safe to retry.

use serde::Deserialize;

use quillcast_core::tools::search::{SearchClient, SearchResult};
use quillcast_types::error::ToolError;

const API_URL: &str = "https://api.duckduckgo.com/";

/// Cap on results returned per query.
const MAX_RESULTS: usize = 5;

pub struct DuckDuckGoSearchClient {
    client: reqwest::Client,
}

impl DuckDuckGoSearchClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

/// Instant Answer API response, reduced to the fields used here.
#[derive(Debug, Deserialize)]
struct InstantAnswer {
    #[serde(rename = "Heading", default)]
    heading: String,
    #[serde(rename = "AbstractText", default)]
    abstract_text: String,
    #[serde(rename = "AbstractURL", default)]
    abstract_url: String,
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<RelatedTopic>,
}

/// Related topics are either direct hits or named groups of hits.
///
/// Untagged: `Group` must come first and require its `Topics` field, or
/// the all-defaulted `Topic` variant would swallow every object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RelatedTopic {
    Group {
        #[serde(rename = "Topics")]
        topics: Vec<RelatedTopic>,
    },
    Topic {
        #[serde(rename = "Text", default)]
        text: String,
        #[serde(rename = "FirstURL", default)]
        first_url: String,
    },
}

fn collect_topics(topics: &[RelatedTopic], out: &mut Vec<SearchResult>) {
    for topic in topics {
        if out.len() >= MAX_RESULTS {
            return;
        }
        match topic {
            RelatedTopic::Topic { text, first_url } => {
                if text.is_empty() {
                    continue;
                }
                // The text's leading clause doubles as a title.
                let title = text.split(" - ").next().unwrap_or(text).to_string();
                out.push(SearchResult {
                    title,
                    snippet: text.clone(),
                    url: first_url.clone(),
                });
            }
            RelatedTopic::Group { topics } => collect_topics(topics, out),
        }
    }
}

fn to_results(answer: &InstantAnswer) -> Vec<SearchResult> {
    let mut results = Vec::new();
    if !answer.abstract_text.is_empty() {
        results.push(SearchResult {
            title: answer.heading.clone(),
            snippet: answer.abstract_text.clone(),
            url: answer.abstract_url.clone(),
        });
    }
    collect_topics(&answer.related_topics, &mut results);
    results.truncate(MAX_RESULTS);
    results
}

impl SearchClient for DuckDuckGoSearchClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ToolError> {
        let response = self
            .client
            .get(API_URL)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await
            .map_err(|e| ToolError::Search(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ToolError::Search(format!("HTTP {status}")));
        }

        let answer: InstantAnswer = response
            .json()
            .await
            .map_err(|e| ToolError::Search(format!("malformed response: {e}")))?;

        Ok(to_results(&answer))
    }
}
