//! Selection and hover state, and the visuals derived from it.
//!
//! Opacity and interactivity are pure functions of a marker's cluster and the
//! current [`Selection`]; the controller applies them in a single pass.

use crate::config::MarkerStyle;
use crate::dataset::{ArgumentKey, ClusterId};
use crate::transform::ZoomTransform;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Cluster(ClusterId),
}

impl Selection {
    /// Clicking the selected cluster clears the selection; clicking any other
    /// cluster selects it.
    pub fn toggled(self, id: ClusterId) -> Self {
        match self {
            Selection::Cluster(cur) if cur == id => Selection::None,
            _ => Selection::Cluster(id),
        }
    }

    pub fn cluster(self) -> Option<ClusterId> {
        match self {
            Selection::None => None,
            Selection::Cluster(id) => Some(id),
        }
    }

    pub fn is_selected(self, id: ClusterId) -> bool {
        self == Selection::Cluster(id)
    }

    /// Whether markers of `id` take part in hover and emphasis.
    pub fn admits(self, id: ClusterId) -> bool {
        match self {
            Selection::None => true,
            Selection::Cluster(cur) => cur == id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerVisual {
    pub opacity: f64,
    pub interactive: bool,
}

pub fn marker_visual(cluster: ClusterId, selection: Selection, style: &MarkerStyle) -> MarkerVisual {
    if selection.admits(cluster) {
        MarkerVisual {
            opacity: 1.0,
            interactive: true,
        }
    } else {
        MarkerVisual {
            opacity: style.dimmed_marker_opacity,
            interactive: false,
        }
    }
}

pub fn label_opacity(cluster: ClusterId, selection: Selection, style: &MarkerStyle) -> f64 {
    if selection.admits(cluster) {
        1.0
    } else {
        style.dimmed_label_opacity
    }
}

/// Everything the user can change without reloading the page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewState {
    pub selection: Selection,
    pub hovered: Option<ArgumentKey>,
    pub transform: ZoomTransform,
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: ClusterId = ClusterId(0);
    const B: ClusterId = ClusterId(1);

    #[test]
    fn toggle_law() {
        let s = Selection::None.toggled(A);
        assert_eq!(s, Selection::Cluster(A));
        assert_eq!(s.toggled(A), Selection::None);
        assert_eq!(s.toggled(B), Selection::Cluster(B));
    }

    #[test]
    fn visuals_follow_selection() {
        let style = MarkerStyle::default();
        let none = Selection::None;
        assert_eq!(marker_visual(B, none, &style), MarkerVisual { opacity: 1.0, interactive: true });
        assert_eq!(label_opacity(B, none, &style), 1.0);

        let sel = Selection::Cluster(A);
        assert_eq!(marker_visual(A, sel, &style), MarkerVisual { opacity: 1.0, interactive: true });
        assert_eq!(marker_visual(B, sel, &style), MarkerVisual { opacity: 0.2, interactive: false });
        assert_eq!(label_opacity(A, sel, &style), 1.0);
        assert_eq!(label_opacity(B, sel, &style), 0.3);
    }
}
