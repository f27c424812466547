use scatter::prelude::*;
use scatter::scale::Extent;

/// Two clusters: A has 3 arguments with x in [0, 10], B has 2 with x in [5, 15].
fn two_clusters() -> Dataset {
    Dataset::from_json_str(
        r#"{
        "clusters": [
            {"id": 0, "cluster": "A", "takeaways": "first", "arguments": [
                {"id": 0, "comment_id": 10, "argument": "foo", "x": 0,  "y": 1},
                {"id": 1, "comment_id": 11, "argument": "a1",  "x": 4,  "y": 3},
                {"id": 2, "comment_id": 12, "argument": "a2",  "x": 10, "y": 2}
            ]},
            {"id": 1, "cluster": "B", "takeaways": "second", "arguments": [
                {"id": 0, "comment_id": 20, "argument": "b0", "x": 5,  "y": 8},
                {"id": 1, "comment_id": 21, "argument": "b1", "x": 15, "y": 9}
            ]}
        ],
        "comments": {
            "10": {"agrees": 9, "disagrees": 1},
            "11": {"agrees": 0, "disagrees": 0},
            "20": {"agrees": 1, "disagrees": 3}
        }
    }"#,
    )
    .unwrap()
}

const A: ClusterId = ClusterId(0);
const B: ClusterId = ClusterId(1);
const SIZE: Size = Size::new(900.0, 600.0);

fn mounted() -> ScatterView {
    let mut v = ScatterView::new(two_clusters(), ViewConfig::default()).unwrap();
    v.mount(SIZE).unwrap();
    v
}

fn opacities(v: &ScatterView, cluster: ClusterId) -> Vec<(f64, bool)> {
    v.marker_views()
        .into_iter()
        .filter(|m| m.key.cluster == cluster)
        .map(|m| (m.opacity, m.interactive))
        .collect()
}

#[test]
fn x_domain_covers_padded_union() {
    let v = mounted();
    let (lo, hi) = v.surface().unwrap().mapper.x_scale().domain();
    assert!(lo <= -1.5 + 1e-9);
    assert!(hi >= 16.5 - 1e-9);

    let e = Extent::of(v.dataset().arguments().map(|(_, a)| a.x)).unwrap();
    assert_eq!((e.min, e.max), (0.0, 15.0));
}

#[test]
fn sidebar_click_dims_and_restores() {
    let mut v = mounted();
    assert!(opacities(&v, A).iter().all(|&o| o == (1.0, true)));
    assert!(opacities(&v, B).iter().all(|&o| o == (1.0, true)));

    v.click_cluster(A, 0.0);
    assert_eq!(opacities(&v, A), vec![(1.0, true); 3]);
    assert_eq!(opacities(&v, B), vec![(0.2, false); 2]);

    let labels = v.label_views();
    assert_eq!(labels.iter().find(|l| l.cluster == A).unwrap().opacity, 1.0);
    assert_eq!(labels.iter().find(|l| l.cluster == B).unwrap().opacity, 0.3);

    let hits = v.hit_target_views();
    assert!(hits.iter().filter(|h| h.key.cluster == B).all(|h| !h.interactive));

    let sidebar = v.sidebar();
    assert!(sidebar.iter().find(|e| e.cluster() == Some(A)).unwrap().active);
    assert!(!sidebar[0].active);

    v.click_cluster(A, 10.0);
    assert_eq!(v.selection(), Selection::None);
    assert!(v.marker_views().iter().all(|m| m.opacity == 1.0 && m.interactive));
    assert!(v.sidebar()[0].active);
}

#[test]
fn show_all_clears_selection() {
    let mut v = mounted();
    v.click_cluster(B, 0.0);
    v.click_cluster(A, 0.0);
    assert_eq!(v.selection(), Selection::Cluster(A));
    v.show_all(0.0);
    assert_eq!(v.selection(), Selection::None);
    assert_eq!(v.sidebar().iter().filter(|e| e.active).count(), 1);
}

#[test]
fn hover_shows_tooltip_and_grows_marker() {
    let mut v = mounted();
    let key = ArgumentKey::new(A, 0);

    let tip = v.pointer_enter(key, 0.0).unwrap();
    assert!(tip.body.contains("foo"));
    assert_eq!(tip.meta.as_deref(), Some("Agree 9 · Disagree 1 · 90% consensus"));

    v.tick(150.0);
    let m = v.marker_views().into_iter().find(|m| m.key == key).unwrap();
    assert_eq!(m.radius, 8.0);
    assert_eq!(m.dom_id, "0-0");

    v.pointer_leave(key, 200.0);
    assert!(v.tooltip().is_none());
    v.tick(350.0);
    let m = v.marker_views().into_iter().find(|m| m.key == key).unwrap();
    assert_eq!(m.radius, 5.0);
}

#[test]
fn resize_rebuild_keeps_layout_and_selection() {
    let mut v = mounted();
    let before: Vec<Point> = v.marker_views().iter().map(|m| m.center).collect();

    v.click_cluster(B, 0.0);
    v.zoom_at(Point::new(100.0, 100.0), 2.0);
    v.pointer_enter(ArgumentKey::new(B, 1), 0.0);

    v.request_resize(1000.0, SIZE);
    v.request_resize(1100.0, SIZE);
    assert!(!v.tick(1300.0).rebuilt);
    let out = v.tick(1350.0);
    assert!(out.rebuilt);

    let after: Vec<Point> = v.marker_views().iter().map(|m| m.center).collect();
    assert_eq!(before, after);
    assert_eq!(v.selection(), Selection::Cluster(B));
    assert_eq!(v.transform().k, 2.0);
    assert_eq!(v.hovered(), None);
    assert!(v.tooltip().is_none());
    assert_eq!(opacities(&v, A), vec![(0.2, false); 3]);
}

#[test]
fn resize_to_new_size_rescales() {
    let mut v = mounted();
    v.request_resize(0.0, Size::new(450.0, 300.0));
    v.tick(250.0);
    let (r0, r1) = v.surface().unwrap().mapper.x_scale().range();
    assert_eq!((r0, r1), (50.0, 400.0));
    assert_eq!(v.status(), ViewStatus::Ready);
}

#[test]
fn unresolved_comments_are_reported_not_fatal() {
    let v = mounted();
    let report = v.preprocess_report();
    assert_eq!(report.missing_comments, vec!["12".to_string(), "21".to_string()]);
    let a2 = v.dataset().argument(ArgumentKey::new(A, 2)).unwrap();
    assert_eq!((a2.votes, a2.disagrees, a2.consensus), (0, 0, 0.0));
    let b0 = v.dataset().argument(ArgumentKey::new(B, 0)).unwrap();
    assert_eq!(b0.consensus, 25.0);
}
