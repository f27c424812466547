//! Criterion benchmarks for scene building and the selection pass.
//!
//! Run with:
//!   cargo bench
//!
//! Results are saved to target/criterion/

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use scatter::prelude::*;

fn make_dataset(clusters: usize, per_cluster: usize) -> Dataset {
    let mut out = String::from(r#"{"clusters": ["#);
    for c in 0..clusters {
        if c > 0 {
            out.push(',');
        }
        out.push_str(&format!(r#"{{"id": {c}, "cluster": "c{c}", "arguments": ["#));
        for a in 0..per_cluster {
            if a > 0 {
                out.push(',');
            }
            let x = (c * 31 + a * 7) % 997;
            let y = (c * 17 + a * 13) % 991;
            out.push_str(&format!(
                r#"{{"id": {a}, "comment_id": {}, "argument": "arg", "x": {x}, "y": {y}}}"#,
                c * per_cluster + a
            ));
        }
        out.push_str("]}");
    }
    out.push_str("]}");
    Dataset::from_json_str(&out).expect("bench dataset parses")
}

/// Full mount (scales + scene) at varying argument counts.
fn bench_mount(c: &mut Criterion) {
    let mut group = c.benchmark_group("mount");

    for total in [500usize, 2_000, 10_000].iter() {
        let ds = make_dataset(20, total / 20);
        let view = ScatterView::new(ds, ViewConfig::default()).expect("view");
        group.throughput(Throughput::Elements(*total as u64));
        group.bench_with_input(BenchmarkId::from_parameter(total), total, |b, _| {
            b.iter(|| {
                let mut v = view.clone();
                v.mount(Size::new(1200.0, 800.0)).expect("mount");
                black_box(v.surface().map(|s| s.scene.markers.len()))
            });
        });
    }

    group.finish();
}

/// Selection toggle followed by the marker visuals pass.
fn bench_selection_pass(c: &mut Criterion) {
    let mut view = ScatterView::new(make_dataset(20, 500), ViewConfig::default()).expect("view");
    view.mount(Size::new(1200.0, 800.0)).expect("mount");

    c.bench_function("select_and_restyle_10k", |b| {
        b.iter(|| {
            view.click_cluster(ClusterId(3), 0.0);
            black_box(view.marker_views().len())
        });
    });
}

criterion_group!(benches, bench_mount, bench_selection_pass);
criterion_main!(benches);
