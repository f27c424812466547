//! Fill in the derived fields of a freshly loaded [`Dataset`].

use crate::dataset::{CommentRecord, Dataset};
use crate::palette::cluster_color;

/// Outcome of [`preprocess`]. Missing or malformed comment records are not
/// errors; they are collected here and logged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreprocessReport {
    pub missing_comments: Vec<String>,
    pub malformed_comments: Vec<String>,
}

impl PreprocessReport {
    pub fn is_clean(&self) -> bool {
        self.missing_comments.is_empty() && self.malformed_comments.is_empty()
    }
}

/// Agreement percentage; 0 when nobody voted.
pub fn consensus(agrees: u32, disagrees: u32) -> f64 {
    let total = agrees as f64 + disagrees as f64;
    if total > 0.0 {
        agrees as f64 / total * 100.0
    } else {
        0.0
    }
}

/// Assign cluster colors by load order and copy vote statistics onto each
/// argument. Re-running on the same input yields the same result.
pub fn preprocess(dataset: &mut Dataset) -> PreprocessReport {
    let mut report = PreprocessReport::default();
    let comments = &dataset.comments;

    for (index, cluster) in dataset.clusters.iter_mut().enumerate() {
        cluster.color = cluster_color(index).to_string();

        for arg in cluster.arguments.iter_mut() {
            arg.cluster = Some(cluster.id);

            let record = match comments.get(arg.comment_id.as_str()) {
                Some(r) if r.malformed => {
                    tracing::warn!(comment_id = %arg.comment_id, "malformed comment record; using zero votes");
                    report.malformed_comments.push(arg.comment_id.0.clone());
                    None
                }
                Some(r) => Some(r),
                None => {
                    tracing::warn!(comment_id = %arg.comment_id, "comment not found; using zero votes");
                    report.missing_comments.push(arg.comment_id.0.clone());
                    None
                }
            };

            let CommentRecord {
                agrees, disagrees, ..
            } = record.cloned().unwrap_or_default();
            arg.votes = agrees;
            arg.disagrees = disagrees;
            arg.consensus = consensus(agrees, disagrees);
        }
    }

    tracing::debug!(
        clusters = dataset.clusters.len(),
        missing = report.missing_comments.len(),
        malformed = report.malformed_comments.len(),
        "dataset preprocessed"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PALETTE;

    fn dataset(n_clusters: usize) -> Dataset {
        let clusters: Vec<String> = (0..n_clusters)
            .map(|i| {
                format!(
                    r#"{{"id": {i}, "cluster": "c{i}", "arguments": [
                        {{"id": 0, "comment_id": {i}, "argument": "a", "x": 0, "y": 0}}
                    ]}}"#
                )
            })
            .collect();
        let json = format!(
            r#"{{"clusters": [{}], "comments": {{
                "0": {{"agrees": 3, "disagrees": 1}},
                "1": {{"agrees": 0, "disagrees": 0}},
                "2": {{"agrees": 2}},
                "3": [1, 2]
            }}}}"#,
            clusters.join(",")
        );
        Dataset::from_json_str(&json).unwrap()
    }

    #[test]
    fn colors_follow_load_order() {
        let mut ds = dataset(30);
        preprocess(&mut ds);
        for (i, c) in ds.clusters.iter().enumerate() {
            assert_eq!(c.color, PALETTE[i % 24]);
        }
    }

    #[test]
    fn consensus_law() {
        let mut ds = dataset(5);
        let report = preprocess(&mut ds);

        let a = &ds.clusters[0].arguments[0];
        assert_eq!((a.votes, a.disagrees), (3, 1));
        assert!((a.consensus - 75.0).abs() < 1e-9);

        // Zero votes: defined as 0.
        assert_eq!(ds.clusters[1].arguments[0].consensus, 0.0);

        // Missing disagrees field.
        let a = &ds.clusters[2].arguments[0];
        assert_eq!((a.votes, a.disagrees), (2, 0));
        assert_eq!(a.consensus, 100.0);

        // Malformed record and missing record both degrade to zeros.
        for i in [3, 4] {
            let a = &ds.clusters[i].arguments[0];
            assert_eq!((a.votes, a.disagrees, a.consensus), (0, 0, 0.0));
        }
        assert_eq!(report.malformed_comments, vec!["3".to_string()]);
        assert_eq!(report.missing_comments, vec!["4".to_string()]);
        assert!(!report.is_clean());
    }

    #[test]
    fn sets_back_references() {
        let mut ds = dataset(3);
        preprocess(&mut ds);
        for c in &ds.clusters {
            for a in &c.arguments {
                assert_eq!(a.cluster, Some(c.id));
            }
        }
    }

    #[test]
    fn idempotent() {
        let mut ds = dataset(4);
        let first = preprocess(&mut ds);
        let snapshot: Vec<(String, f64)> = ds
            .arguments()
            .map(|(c, a)| (c.color.clone(), a.consensus))
            .collect();
        let second = preprocess(&mut ds);
        let again: Vec<(String, f64)> = ds
            .arguments()
            .map(|(c, a)| (c.color.clone(), a.consensus))
            .collect();
        assert_eq!(snapshot, again);
        assert_eq!(first, second);
    }
}
