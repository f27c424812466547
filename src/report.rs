//! Build the compact report dataset from a full pipeline result.
//!
//! The clustering pipeline writes a `result.json` with many more fields than
//! the page needs. The report keeps only what the view reads: cluster ids and
//! argument ids are reassigned as positional indices, comments are trimmed to
//! their text and vote counts, and the page title and question are attached.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::dataset::{Argument, Cluster, ClusterId, CommentId, CommentRecord, Dataset};
use crate::error::DatasetError;

pub const DEFAULT_TITLE: &str = "Report";

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineResult {
    pub clusters: Vec<PipelineCluster>,
    #[serde(default)]
    pub comments: BTreeMap<String, CommentRecord>,
    #[serde(default)]
    pub overview: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineCluster {
    pub cluster: String,
    #[serde(default)]
    pub takeaways: String,
    #[serde(default)]
    pub arguments: Vec<PipelineArgument>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineArgument {
    pub argument: String,
    pub comment_id: CommentId,
    pub x: f64,
    pub y: f64,
}

impl PipelineResult {
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportMeta {
    pub title: Option<String>,
    pub question: Option<String>,
}

pub fn build_report(result: PipelineResult, meta: ReportMeta) -> Dataset {
    let clusters: Vec<Cluster> = result
        .clusters
        .into_iter()
        .enumerate()
        .map(|(i, c)| Cluster {
            id: ClusterId(i as u32),
            cluster: c.cluster,
            takeaways: c.takeaways,
            arguments: c
                .arguments
                .into_iter()
                .enumerate()
                .map(|(j, a)| Argument {
                    id: j as u32,
                    comment_id: a.comment_id,
                    argument: a.argument,
                    x: a.x,
                    y: a.y,
                    cluster: None,
                    votes: 0,
                    disagrees: 0,
                    consensus: 0.0,
                })
                .collect(),
            color: String::new(),
        })
        .collect();

    let malformed: Vec<&str> = result
        .comments
        .iter()
        .filter(|(_, c)| c.malformed)
        .map(|(id, _)| id.as_str())
        .collect();
    if !malformed.is_empty() {
        tracing::warn!(
            count = malformed.len(),
            ids = ?malformed,
            "malformed comment records carried as zero votes"
        );
    }

    let comments = result
        .comments
        .into_iter()
        .map(|(id, c)| {
            let trimmed = CommentRecord {
                comment: c.comment,
                agrees: c.agrees,
                disagrees: c.disagrees,
                malformed: c.malformed,
            };
            (id, trimmed)
        })
        .collect();

    let mut ds = Dataset::new(clusters, comments);
    ds.overview = result.overview;
    ds.title = Some(meta.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()));
    ds.question = Some(meta.question.unwrap_or_default());

    tracing::info!(
        clusters = ds.clusters.len(),
        arguments = ds.argument_count(),
        comments = ds.comments.len(),
        "report built"
    );
    ds
}
