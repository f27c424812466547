//! # scatter
//!
//! View logic for an interactive scatter plot of clustered arguments: opinions
//! embedded in 2D, grouped by semantic similarity, colored per cluster, with
//! pan/zoom, hover tooltips and cluster filtering from a sidebar.
//!
//! Everything here is host-testable. The browser shell (`scatter_web`) only
//! forwards DOM events into [`controller::ScatterView`] and mirrors its output.
//!
//! ## Quick Start
//!
//! ```
//! use scatter::prelude::*;
//!
//! let json = r#"{
//!     "clusters": [{
//!         "id": 0, "cluster": "Transit", "takeaways": "More buses.",
//!         "arguments": [
//!             {"id": 0, "comment_id": 1, "argument": "Run buses later", "x": 0.0, "y": 1.0},
//!             {"id": 1, "comment_id": 2, "argument": "Add a tram line", "x": 2.0, "y": 3.0}
//!         ]
//!     }],
//!     "comments": {"1": {"agrees": 3, "disagrees": 1}}
//! }"#;
//!
//! let dataset = Dataset::from_json_str(json).unwrap();
//! let mut view = ScatterView::new(dataset, ViewConfig::default()).unwrap();
//! view.mount(Size::new(800.0, 560.0)).unwrap();
//!
//! view.click_cluster(ClusterId(0), 0.0);
//! assert_eq!(view.selection(), Selection::Cluster(ClusterId(0)));
//! ```
//!
//! ## Modules
//!
//! - [`dataset`]: report data model and JSON loading
//! - [`preprocess`]: cluster colors and vote statistics
//! - [`scale`]: embedding → pixel coordinate mapping
//! - [`scene`]: markers, hit-targets and cluster labels
//! - [`selection`]: selection state and derived visuals
//! - [`controller`]: the top-level view controller
//! - [`report`]: pipeline result → report dataset
//! - [`snapshot`]: static SVG export

pub mod anim;
pub mod config;
pub mod controller;
pub mod dataset;
pub mod error;
pub mod geom;
pub mod palette;
pub mod preprocess;
pub mod report;
pub mod scale;
pub mod scene;
pub mod selection;
pub mod sidebar;
pub mod snapshot;
pub mod tooltip;
pub mod transform;

/// Prelude module for convenient imports.
///
/// ```
/// use scatter::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::ViewConfig;
    pub use crate::controller::{LabelView, MarkerView, ScatterView, ViewStatus};
    pub use crate::dataset::{Argument, ArgumentKey, Cluster, ClusterId, CommentRecord, Dataset};
    pub use crate::error::{ConfigError, DatasetError, SceneError};
    pub use crate::geom::{Point, Size};
    pub use crate::selection::{Selection, ViewState};
    pub use crate::sidebar::{EntryKind, SidebarEntry};
    pub use crate::transform::ZoomTransform;
}
