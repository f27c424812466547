//! Static SVG export of the current view.
//!
//! Used by `scatter-cli snapshot` to render a report without a browser. The
//! output mirrors what the browser shell draws: markers, then labels, inside
//! one transformed group, with the selection's opacities applied.

use std::fmt::Write as _;

use crate::controller::ScatterView;

pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// SVG document for the mounted surface, `None` if nothing is mounted.
pub fn render_svg(view: &ScatterView) -> Option<String> {
    let surface = view.surface()?;
    let size = surface.mapper.size();
    let mut svg = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}">"#,
        size.width, size.height, size.width, size.height
    );
    let _ = writeln!(
        svg,
        r#"<g class="main-group" transform="{}">"#,
        view.transform().to_svg()
    );

    let _ = writeln!(svg, r#"<g class="point-group">"#);
    for m in view.marker_views() {
        let _ = writeln!(
            svg,
            r#"<circle class="dot" data-arg-id="{}" data-cluster-id="{}" cx="{:.2}" cy="{:.2}" r="{}" fill="{}" opacity="{}"/>"#,
            m.dom_id, m.key.cluster, m.center.x, m.center.y, m.radius, m.fill, m.opacity
        );
    }
    let _ = writeln!(svg, "</g>");

    let _ = writeln!(svg, r#"<g class="label-group">"#);
    for l in view.label_views() {
        let _ = writeln!(
            svg,
            r#"<text class="cluster-label" data-cluster-id="{}" x="{:.2}" y="{:.2}" text-anchor="middle" fill="{}" opacity="{}">{}</text>"#,
            l.cluster,
            l.position.x,
            l.position.y,
            l.fill,
            l.opacity,
            escape_xml(&l.text)
        );
    }
    let _ = writeln!(svg, "</g>");

    let _ = writeln!(svg, "</g>");
    let _ = write!(svg, "</svg>");
    Some(svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewConfig;
    use crate::dataset::{ClusterId, Dataset};
    use crate::geom::Size;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_xml(r#"<a & "b">"#), "&lt;a &amp; &quot;b&quot;&gt;");
    }

    #[test]
    fn renders_markers_and_dimmed_labels() {
        let ds = Dataset::from_json_str(
            r#"{"clusters": [
                {"id": 0, "cluster": "Bikes & <lanes>", "arguments": [
                    {"id": 0, "comment_id": 0, "argument": "x", "x": 0, "y": 0}
                ]},
                {"id": 1, "cluster": "Cars", "arguments": [
                    {"id": 0, "comment_id": 1, "argument": "y", "x": 1, "y": 1}
                ]}
            ]}"#,
        )
        .unwrap();
        let mut v = ScatterView::new(ds, ViewConfig::default()).unwrap();
        assert!(render_svg(&v).is_none());

        v.mount(Size::new(400.0, 300.0)).unwrap();
        v.click_cluster(ClusterId(0), 0.0);
        let svg = render_svg(&v).unwrap();

        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(svg.contains(r#"data-arg-id="1-0""#));
        assert!(svg.contains(r#"opacity="0.2""#));
        assert!(svg.contains(r#"opacity="0.3">Cars</text>"#));
        assert!(svg.contains("Bikes &amp; &lt;lanes&gt;"));
        assert!(svg.contains(r#"transform="translate(0,0) scale(1)""#));
    }
}
