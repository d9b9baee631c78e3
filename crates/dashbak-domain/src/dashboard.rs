//! Dashboard models.
//!
//! Backups keep the upstream document bytes untouched; the structural view
//! here exists only so the hierarchical mode can read datasource references
//! out of a fetched dashboard.

use serde::Deserialize;
use std::collections::HashSet;

/// One hit from the dashboard search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardSummary {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    pub uri: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "isStarred", default)]
    pub starred: bool,
}

/// Metadata returned alongside a fetched dashboard.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardMeta {
    pub slug: String,
}

/// A fetched dashboard: the document exactly as the service sent it, plus
/// the metadata needed to name its backup file.
#[derive(Debug, Clone)]
pub struct RawDashboard {
    pub meta: DashboardMeta,
    pub raw: Vec<u8>,
}

impl RawDashboard {
    /// Parse the structural view out of the raw bytes.
    pub fn parse(&self) -> Result<DashboardDocument, serde_json::Error> {
        serde_json::from_slice(&self.raw)
    }
}

/// Structural view of a dashboard document: ordered rows of ordered panels,
/// each panel optionally naming the datasource it queries. Deserialize-only;
/// backups never re-serialize this view.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardDocument {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Row {
    #[serde(default)]
    pub panels: Vec<Panel>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Panel {
    #[serde(default)]
    pub datasource: Option<String>,
}

impl DashboardDocument {
    /// Names of every datasource referenced by any panel. Panels without a
    /// reference and empty names are skipped; duplicates collapse.
    pub fn referenced_datasources(&self) -> HashSet<String> {
        let mut names = HashSet::new();
        for row in &self.rows {
            for panel in &row.panels {
                if let Some(name) = &panel.datasource {
                    if !name.is_empty() {
                        names.insert(name.clone());
                    }
                }
            }
        }
        names
    }
}
