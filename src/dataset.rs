//! Report data model.
//!
//! A report is an ordered list of clusters, each owning an ordered list of
//! arguments, plus a comment lookup keyed by stringified comment id. The
//! structure is fixed after load; only the derived fields (cluster color,
//! argument votes and consensus) are filled in by [`crate::preprocess`].

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use hashbrown::HashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::DatasetError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterId(pub u32);

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies one argument across the whole report: argument ids are only
/// unique within their cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArgumentKey {
    pub cluster: ClusterId,
    pub argument: u32,
}

impl ArgumentKey {
    pub const fn new(cluster: ClusterId, argument: u32) -> Self {
        Self { cluster, argument }
    }
}

/// Renders as `"{cluster}-{argument}"`, the `data-arg-id` attribute value.
impl fmt::Display for ArgumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.cluster.0, self.argument)
    }
}

/// Source comment id. Upstream data carries these as numbers or strings; the
/// lookup table is always keyed by the string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct CommentId(pub String);

impl CommentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CommentId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let v = Value::deserialize(d)?;
        Ok(CommentId(match v {
            Value::String(s) => s,
            Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => i.to_string(),
                (None, Some(f)) if f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
                _ => n.to_string(),
            },
            Value::Null => String::new(),
            other => other.to_string(),
        }))
    }
}

impl Serialize for CommentId {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Argument {
    pub id: u32,
    pub comment_id: CommentId,
    pub argument: String,
    pub x: f64,
    pub y: f64,

    /// Owning cluster, set by preprocessing.
    #[serde(skip)]
    pub cluster: Option<ClusterId>,
    #[serde(skip)]
    pub votes: u32,
    #[serde(skip)]
    pub disagrees: u32,
    /// Agreement percentage in `[0, 100]`.
    #[serde(skip)]
    pub consensus: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    pub id: ClusterId,
    /// Display name.
    pub cluster: String,
    #[serde(default)]
    pub takeaways: String,
    #[serde(default)]
    pub arguments: Vec<Argument>,

    #[serde(skip)]
    pub color: String,
}

impl Cluster {
    pub fn key(&self, argument: &Argument) -> ArgumentKey {
        ArgumentKey::new(self.id, argument.id)
    }
}

/// Vote counts for a source comment.
///
/// Deserialization never fails: a record that is not an object, or whose
/// counts are not non-negative numbers, loads with zero counts and
/// `malformed = true` so preprocessing can report it.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CommentRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub agrees: u32,
    pub disagrees: u32,
    #[serde(skip)]
    pub malformed: bool,
}

impl CommentRecord {
    pub fn from_value(v: &Value) -> Self {
        let Some(obj) = v.as_object() else {
            return Self {
                malformed: true,
                ..Self::default()
            };
        };
        let mut malformed = false;
        let mut count = |key: &str| match obj.get(key) {
            None | Some(Value::Null) => 0,
            Some(v) => match lenient_count(v) {
                Some(n) => n,
                None => {
                    malformed = true;
                    0
                }
            },
        };
        let agrees = count("agrees");
        let disagrees = count("disagrees");
        Self {
            comment: obj
                .get("comment")
                .and_then(Value::as_str)
                .map(str::to_string),
            agrees,
            disagrees,
            malformed,
        }
    }
}

impl<'de> Deserialize<'de> for CommentRecord {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let v = Value::deserialize(d)?;
        Ok(Self::from_value(&v))
    }
}

fn lenient_count(v: &Value) -> Option<u32> {
    if let Some(n) = v.as_u64() {
        return u32::try_from(n).ok();
    }
    let f = v.as_f64()?;
    if f.is_finite() && f >= 0.0 && f <= u32::MAX as f64 {
        Some(f.round() as u32)
    } else {
        None
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Dataset {
    pub clusters: Vec<Cluster>,
    #[serde(default)]
    pub comments: BTreeMap<String, CommentRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,

    #[serde(skip)]
    index: HashMap<ClusterId, usize>,
}

impl Dataset {
    pub fn new(clusters: Vec<Cluster>, comments: BTreeMap<String, CommentRecord>) -> Self {
        let mut ds = Self {
            clusters,
            comments,
            ..Self::default()
        };
        ds.reindex();
        ds
    }

    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let mut ds: Self = serde_json::from_str(json)?;
        ds.reindex();
        Ok(ds)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String, DatasetError> {
        Ok(serde_json::to_string(self)?)
    }

    fn reindex(&mut self) {
        self.index = self
            .clusters
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id, i))
            .collect();
        if self.index.len() != self.clusters.len() {
            tracing::warn!(
                clusters = self.clusters.len(),
                unique = self.index.len(),
                "duplicate cluster ids; lookups resolve to the last occurrence"
            );
        }
    }

    pub fn cluster(&self, id: ClusterId) -> Option<&Cluster> {
        self.cluster_index(id).map(|i| &self.clusters[i])
    }

    pub fn cluster_index(&self, id: ClusterId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn contains_cluster(&self, id: ClusterId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn argument(&self, key: ArgumentKey) -> Option<&Argument> {
        self.cluster(key.cluster)?
            .arguments
            .iter()
            .find(|a| a.id == key.argument)
    }

    /// All arguments across clusters, in dataset order, with their owner.
    pub fn arguments(&self) -> impl Iterator<Item = (&Cluster, &Argument)> + '_ {
        self.clusters
            .iter()
            .flat_map(|c| c.arguments.iter().map(move |a| (c, a)))
    }

    pub fn argument_count(&self) -> usize {
        self.clusters.iter().map(|c| c.arguments.len()).sum()
    }

    pub fn comment(&self, id: &CommentId) -> Option<&CommentRecord> {
        self.comments.get(id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "clusters": [
            {"id": 3, "cluster": "Parks", "takeaways": "Keep them green.",
             "arguments": [
                {"id": 0, "comment_id": 17, "argument": "More trees", "x": 1.5, "y": -2.0},
                {"id": 1, "comment_id": "a-9", "argument": "Benches", "x": 0.0, "y": 0.0}
             ]},
            {"id": 5, "cluster": "Roads", "arguments": []}
        ],
        "comments": {
            "17": {"comment": "We need more trees", "agrees": 4, "disagrees": 1},
            "a-9": "oops",
            "x": {"agrees": "many"}
        },
        "overview": "Two topics."
    }"#;

    #[test]
    fn loads_and_indexes_clusters() {
        let ds = Dataset::from_json_str(SAMPLE).unwrap();
        assert_eq!(ds.clusters.len(), 2);
        assert_eq!(ds.cluster_index(ClusterId(5)), Some(1));
        assert!(ds.cluster(ClusterId(4)).is_none());
        assert_eq!(ds.argument_count(), 2);
        assert_eq!(ds.clusters[1].takeaways, "");
        assert_eq!(ds.overview.as_deref(), Some("Two topics."));
    }

    #[test]
    fn numeric_comment_ids_are_stringified() {
        let ds = Dataset::from_json_str(SAMPLE).unwrap();
        let arg = ds.argument(ArgumentKey::new(ClusterId(3), 0)).unwrap();
        assert_eq!(arg.comment_id.as_str(), "17");
        assert_eq!(ds.comment(&arg.comment_id).unwrap().agrees, 4);
    }

    #[test]
    fn float_comment_ids_drop_trailing_zero() {
        let id: CommentId = serde_json::from_str("42.0").unwrap();
        assert_eq!(id.as_str(), "42");
    }

    #[test]
    fn malformed_comment_records_load_as_zero() {
        let ds = Dataset::from_json_str(SAMPLE).unwrap();
        let bad = &ds.comments["a-9"];
        assert!(bad.malformed);
        assert_eq!((bad.agrees, bad.disagrees), (0, 0));

        let bad = &ds.comments["x"];
        assert!(bad.malformed);
        assert_eq!(bad.agrees, 0);
    }

    #[test]
    fn argument_key_display_matches_dom_id() {
        assert_eq!(ArgumentKey::new(ClusterId(2), 7).to_string(), "2-7");
    }

    #[test]
    fn derived_fields_are_not_serialized() {
        let ds = Dataset::from_json_str(SAMPLE).unwrap();
        let json = ds.to_json_string().unwrap();
        assert!(!json.contains("consensus"));
        assert!(!json.contains("color"));
        let back = Dataset::from_json_str(&json).unwrap();
        assert_eq!(back.clusters[0].arguments[1].comment_id.as_str(), "a-9");
    }
}
