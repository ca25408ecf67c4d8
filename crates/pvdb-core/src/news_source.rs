//! Crawled news-source descriptors.
//!
//! Independent of incidents — each incident carries a denormalized
//! `news_source` name string, with no enforced foreign key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsSource {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub status: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub last_crawled: DateTime<Utc>,
    pub daily_articles: u32,
    pub reliability: u32,
}

/// Insertion input for a news source. The store assigns `id`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewNewsSource {
    pub name: String,
    pub url: String,
    pub status: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub last_crawled: DateTime<Utc>,
    #[serde(default)]
    pub daily_articles: u32,
    #[serde(default)]
    pub reliability: u32,
}
