//! Retained scene for one drawing surface: markers, hit-targets and cluster
//! labels, all in layer (pre-transform) pixel coordinates.

use crate::config::MarkerStyle;
use crate::dataset::{ArgumentKey, ClusterId, Dataset};
use crate::geom::{centroid, Point};
use crate::palette::label_color;
use crate::scale::CoordinateMapper;

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub key: ArgumentKey,
    pub center: Point,
    pub fill: String,
}

impl Marker {
    pub fn cluster(&self) -> ClusterId {
        self.key.cluster
    }
}

/// Transparent circle stacked on a marker to enlarge its pointer area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTarget {
    pub key: ArgumentKey,
    pub center: Point,
    pub radius: f64,
}

impl HitTarget {
    pub fn contains(&self, p: Point) -> bool {
        let dx = p.x - self.center.x;
        let dy = p.y - self.center.y;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClusterLabel {
    pub cluster: ClusterId,
    pub position: Point,
    pub text: String,
    pub fill: String,
}

/// Draw order: markers, then hit-targets on top of them, then labels.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub markers: Vec<Marker>,
    pub hit_targets: Vec<HitTarget>,
    pub labels: Vec<ClusterLabel>,
}

impl Scene {
    /// Build a fresh scene. Arguments with non-finite coordinates are skipped;
    /// clusters with no plotted arguments get no label.
    pub fn build(dataset: &Dataset, mapper: &CoordinateMapper, style: &MarkerStyle) -> Self {
        let mut scene = Scene::default();
        let mut skipped = 0usize;

        for cluster in &dataset.clusters {
            let first = scene.markers.len();
            for arg in &cluster.arguments {
                let center = mapper.map(arg.x, arg.y);
                if !center.is_finite() {
                    skipped += 1;
                    continue;
                }
                let key = cluster.key(arg);
                scene.markers.push(Marker {
                    key,
                    center,
                    fill: cluster.color.clone(),
                });
                scene.hit_targets.push(HitTarget {
                    key,
                    center,
                    radius: style.hit_radius,
                });
            }

            // Centroid of mapped pixel positions, not of raw coordinates.
            if let Some(position) = centroid(scene.markers[first..].iter().map(|m| m.center)) {
                scene.labels.push(ClusterLabel {
                    cluster: cluster.id,
                    position,
                    text: cluster.cluster.clone(),
                    fill: label_color(&cluster.color),
                });
            }
        }

        if skipped > 0 {
            tracing::warn!(skipped, "arguments with non-finite coordinates not drawn");
        }
        scene
    }

    pub fn marker(&self, key: ArgumentKey) -> Option<&Marker> {
        self.markers.iter().find(|m| m.key == key)
    }

    pub fn label(&self, cluster: ClusterId) -> Option<&ClusterLabel> {
        self.labels.iter().find(|l| l.cluster == cluster)
    }

    /// Topmost hit-target under `p` (layer coordinates) that passes `accept`.
    pub fn hit_test<F>(&self, p: Point, accept: F) -> Option<ArgumentKey>
    where
        F: Fn(ClusterId) -> bool,
    {
        self.hit_targets
            .iter()
            .rev()
            .find(|h| accept(h.key.cluster) && h.contains(p))
            .map(|h| h.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::geom::Size;
    use crate::preprocess::preprocess;

    fn dataset() -> Dataset {
        let mut ds = Dataset::from_json_str(
            r#"{"clusters": [
                {"id": 0, "cluster": "A", "arguments": [
                    {"id": 0, "comment_id": 0, "argument": "a0", "x": 0, "y": 0},
                    {"id": 1, "comment_id": 1, "argument": "a1", "x": 10, "y": 10}
                ]},
                {"id": 1, "cluster": "B", "arguments": [
                    {"id": 0, "comment_id": 2, "argument": "b0", "x": 5, "y": 5}
                ]},
                {"id": 2, "cluster": "Empty", "arguments": []}
            ]}"#,
        )
        .unwrap();
        preprocess(&mut ds);
        ds
    }

    fn scene(ds: &Dataset) -> (Scene, CoordinateMapper) {
        let mapper =
            CoordinateMapper::new(ds, Size::new(600.0, 400.0), &LayoutConfig::default()).unwrap();
        (Scene::build(ds, &mapper, &MarkerStyle::default()), mapper)
    }

    #[test]
    fn one_marker_and_hit_target_per_argument() {
        let ds = dataset();
        let (s, mapper) = scene(&ds);
        assert_eq!(s.markers.len(), 3);
        assert_eq!(s.hit_targets.len(), 3);
        for (m, h) in s.markers.iter().zip(&s.hit_targets) {
            assert_eq!(m.key, h.key);
            assert_eq!(m.center, h.center);
            assert_eq!(h.radius, 12.0);
        }
        let b0 = s.marker(ArgumentKey::new(ClusterId(1), 0)).unwrap();
        assert_eq!(b0.center, mapper.map(5.0, 5.0));
        assert_eq!(b0.fill, "#dc2626");
    }

    #[test]
    fn labels_sit_at_pixel_centroid() {
        let ds = dataset();
        let (s, mapper) = scene(&ds);
        assert_eq!(s.labels.len(), 2);
        let a = s.label(ClusterId(0)).unwrap();
        let p0 = mapper.map(0.0, 0.0);
        let p1 = mapper.map(10.0, 10.0);
        assert!((a.position.x - (p0.x + p1.x) / 2.0).abs() < 1e-9);
        assert!((a.position.y - (p0.y + p1.y) / 2.0).abs() < 1e-9);
        assert_eq!(a.text, "A");
        assert_eq!(a.fill, label_color("#2563eb"));
        assert!(s.label(ClusterId(2)).is_none());
    }

    #[test]
    fn hit_test_prefers_topmost_and_respects_filter() {
        let ds = dataset();
        let (s, mapper) = scene(&ds);
        let p = mapper.map(5.0, 5.0);
        assert_eq!(s.hit_test(p, |_| true), Some(ArgumentKey::new(ClusterId(1), 0)));
        assert_eq!(s.hit_test(p, |c| c != ClusterId(1)), None);
        let near = Point::new(p.x + 11.0, p.y);
        assert!(s.hit_test(near, |_| true).is_some());
        let far = Point::new(p.x + 13.0, p.y);
        assert!(s.hit_test(far, |_| true).is_none());
    }

    #[test]
    fn non_finite_arguments_are_skipped() {
        let mut ds = dataset();
        // B's only argument becomes unplottable; A keeps one of two.
        ds.clusters[1].arguments[0].y = f64::NAN;
        ds.clusters[0].arguments[1].x = f64::INFINITY;
        let (s, mapper) = scene(&ds);

        assert_eq!(s.markers.len(), 1);
        assert_eq!(s.hit_targets.len(), 1);
        assert_eq!(s.markers[0].key, ArgumentKey::new(ClusterId(0), 0));
        assert!(s.markers.iter().all(|m| m.center.is_finite()));

        assert!(s.label(ClusterId(1)).is_none());
        let a = s.label(ClusterId(0)).unwrap();
        assert_eq!(a.position, mapper.map(0.0, 0.0));
    }

    #[test]
    fn rebuild_is_deterministic() {
        let ds = dataset();
        let (a, _) = scene(&ds);
        let (b, _) = scene(&ds);
        assert_eq!(a, b);
    }
}
