//! Sidebar list model: a "show all" entry followed by one entry per cluster.

use crate::config::SidebarLabels;
use crate::dataset::{ClusterId, Dataset};
use crate::selection::Selection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    ShowAll,
    Cluster(ClusterId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SidebarEntry {
    pub kind: EntryKind,
    pub title: String,
    /// Argument count caption; empty for "show all".
    pub count: String,
    pub takeaway: String,
    /// Title color; `None` for "show all".
    pub color: Option<String>,
    pub active: bool,
}

impl SidebarEntry {
    pub fn cluster(&self) -> Option<ClusterId> {
        match self.kind {
            EntryKind::ShowAll => None,
            EntryKind::Cluster(id) => Some(id),
        }
    }
}

/// Exactly one entry is active: the selected cluster, or "show all" when
/// nothing is selected.
pub fn entries(dataset: &Dataset, selection: Selection, labels: &SidebarLabels) -> Vec<SidebarEntry> {
    let mut out = Vec::with_capacity(dataset.clusters.len() + 1);
    out.push(SidebarEntry {
        kind: EntryKind::ShowAll,
        title: labels.show_all.clone(),
        count: String::new(),
        takeaway: String::new(),
        color: None,
        active: selection == Selection::None,
    });
    out.extend(dataset.clusters.iter().map(|c| SidebarEntry {
        kind: EntryKind::Cluster(c.id),
        title: c.cluster.clone(),
        count: labels.count_caption(c.arguments.len()),
        takeaway: c.takeaways.clone(),
        color: Some(c.color.clone()),
        active: selection.is_selected(c.id),
    }));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocess::preprocess;

    fn dataset() -> Dataset {
        let mut ds = Dataset::from_json_str(
            r#"{"clusters": [
                {"id": 4, "cluster": "Housing", "takeaways": "Rents are high.", "arguments": [
                    {"id": 0, "comment_id": 0, "argument": "x", "x": 0, "y": 0},
                    {"id": 1, "comment_id": 1, "argument": "y", "x": 1, "y": 1}
                ]},
                {"id": 9, "cluster": "Water", "takeaways": "", "arguments": []}
            ]}"#,
        )
        .unwrap();
        preprocess(&mut ds);
        ds
    }

    #[test]
    fn show_all_first_then_dataset_order() {
        let ds = dataset();
        let e = entries(&ds, Selection::None, &SidebarLabels::default());
        assert_eq!(e.len(), 3);
        assert_eq!(e[0].kind, EntryKind::ShowAll);
        assert_eq!(e[1].kind, EntryKind::Cluster(ClusterId(4)));
        assert_eq!(e[1].title, "Housing");
        assert_eq!(e[1].count, "2 opinions");
        assert_eq!(e[1].takeaway, "Rents are high.");
        assert_eq!(e[1].color.as_deref(), Some("#2563eb"));
        assert_eq!(e[2].count, "0 opinions");
    }

    #[test]
    fn exactly_one_active() {
        let ds = dataset();
        for sel in [Selection::None, Selection::Cluster(ClusterId(4)), Selection::Cluster(ClusterId(9))] {
            let e = entries(&ds, sel, &SidebarLabels::default());
            assert_eq!(e.iter().filter(|x| x.active).count(), 1);
        }
        let e = entries(&ds, Selection::Cluster(ClusterId(9)), &SidebarLabels::default());
        assert!(e[2].active);
        assert!(!e[0].active);
    }
}
