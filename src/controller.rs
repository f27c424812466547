//! Top-level view controller.
//!
//! [`ScatterView`] owns the dataset, the view state and the current drawing
//! surface. Event handlers call its methods; renderers read its `*_views`
//! accessors. Time is passed in as milliseconds on every call that can start
//! or advance an animation.

use hashbrown::HashMap;

use crate::anim::{Debouncer, Timeline, Transition};
use crate::config::ViewConfig;
use crate::dataset::{ArgumentKey, ClusterId, Dataset};
use crate::error::SceneError;
use crate::geom::{Point, Size};
use crate::preprocess::{preprocess, PreprocessReport};
use crate::scale::CoordinateMapper;
use crate::scene::Scene;
use crate::selection::{label_opacity, marker_visual, Selection, ViewState};
use crate::sidebar::{self, SidebarEntry};
use crate::tooltip::{self, Tooltip};
use crate::transform::{wheel_factor, ZoomTransform};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewStatus {
    #[default]
    Unmounted,
    Ready,
    NoData,
}

impl ViewStatus {
    /// Placeholder text to show instead of the plot, if any.
    pub fn message(self) -> Option<&'static str> {
        match self {
            ViewStatus::Unmounted => None,
            ViewStatus::Ready => None,
            ViewStatus::NoData => Some("No data to display."),
        }
    }
}

/// Scales and scene for one surface size. Replaced wholesale on rebuild.
#[derive(Debug, Clone)]
pub struct Surface {
    pub mapper: CoordinateMapper,
    pub scene: Scene,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerView {
    pub key: ArgumentKey,
    /// `data-arg-id` attribute value.
    pub dom_id: String,
    pub center: Point,
    pub radius: f64,
    pub fill: String,
    pub opacity: f64,
    pub interactive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HitTargetView {
    pub key: ArgumentKey,
    pub dom_id: String,
    pub center: Point,
    pub radius: f64,
    pub interactive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelView {
    pub cluster: ClusterId,
    pub position: Point,
    pub text: String,
    pub fill: String,
    pub opacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// The surface was torn down and rebuilt during this tick.
    pub rebuilt: bool,
    /// More ticks are needed (animation running or resize pending).
    pub animating: bool,
}

#[derive(Debug, Clone)]
pub struct ScatterView {
    dataset: Dataset,
    config: ViewConfig,
    preprocess: PreprocessReport,
    state: ViewState,
    status: ViewStatus,
    surface: Option<Surface>,

    /// Marker radii that differ from the base radius once settled.
    radii: HashMap<ArgumentKey, f64>,
    radius_anim: Timeline<ArgumentKey, f64>,
    zoom_anim: Option<Transition<ZoomTransform>>,
    resize: Debouncer<Size>,
    tooltip: Option<Tooltip>,
}

impl ScatterView {
    /// Validate `config` and preprocess `dataset`. Nothing is drawn until
    /// [`ScatterView::mount`].
    pub fn new(mut dataset: Dataset, config: ViewConfig) -> Result<Self, SceneError> {
        config.validate().map_err(SceneError::InvalidConfig)?;
        let preprocess = preprocess(&mut dataset);
        let resize = Debouncer::new(config.timing.resize_debounce_ms);
        Ok(Self {
            dataset,
            config,
            preprocess,
            state: ViewState::default(),
            status: ViewStatus::Unmounted,
            surface: None,
            radii: HashMap::new(),
            radius_anim: Timeline::new(),
            zoom_anim: None,
            resize,
            tooltip: None,
        })
    }

    // ── surface lifecycle ────────────────────────────────────────────────

    /// Build scales and scene for a surface of `size`. Any previous scene is
    /// discarded. Selection and transform are kept; hover is cleared.
    pub fn mount(&mut self, size: Size) -> Result<(), SceneError> {
        self.clear_hover_state();
        self.surface = None;

        let mapper = match CoordinateMapper::new(&self.dataset, size, &self.config.layout) {
            Ok(m) => m,
            Err(e) => {
                self.status = ViewStatus::NoData;
                tracing::error!("scatter plot not drawn: {e}");
                return Err(e);
            }
        };
        let scene = Scene::build(&self.dataset, &mapper, &self.config.markers);
        if scene.markers.is_empty() {
            self.status = ViewStatus::NoData;
            tracing::error!("scatter plot not drawn: no argument has plottable coordinates");
            return Err(SceneError::NoData);
        }
        tracing::info!(
            width = size.width,
            height = size.height,
            markers = scene.markers.len(),
            labels = scene.labels.len(),
            "scatter plot built"
        );
        self.surface = Some(Surface { mapper, scene });
        self.status = ViewStatus::Ready;
        Ok(())
    }

    /// Schedule a rebuild at `size` once resizes stop for the debounce period.
    pub fn request_resize(&mut self, now_ms: f64, size: Size) {
        self.resize.trigger(now_ms, size);
    }

    /// Advance animations and run a due resize rebuild.
    pub fn tick(&mut self, now_ms: f64) -> TickOutcome {
        let mut out = TickOutcome::default();

        if let Some(size) = self.resize.poll(now_ms) {
            // Failure is already logged and reflected in `status`.
            out.rebuilt = self.mount(size).is_ok();
        }

        let base = self.config.markers.radius;
        for (key, r) in self.radius_anim.advance(now_ms) {
            if r == base {
                self.radii.remove(&key);
            } else {
                self.radii.insert(key, r);
            }
        }

        if let Some(t) = self.zoom_anim {
            self.state.transform = t.value_at(now_ms);
            if t.is_done(now_ms) {
                self.zoom_anim = None;
            }
        }

        out.animating = self.needs_tick();
        out
    }

    pub fn needs_tick(&self) -> bool {
        self.resize.is_pending() || !self.radius_anim.is_idle() || self.zoom_anim.is_some()
    }

    // ── hover / click ────────────────────────────────────────────────────

    /// Pointer entered the marker or hit-target of `key`. Returns the tooltip
    /// to show, or `None` when the marker is gated by the current selection
    /// (or unknown). Place the returned tooltip with
    /// [`ScatterView::place_tooltip`] once its rendered size is known.
    pub fn pointer_enter(&mut self, key: ArgumentKey, now_ms: f64) -> Option<&Tooltip> {
        if !self.state.selection.admits(key.cluster) {
            return None;
        }
        let surface = self.surface.as_ref()?;
        surface.scene.marker(key)?;
        let arg = self.dataset.argument(key)?;

        self.tooltip = Some(Tooltip::for_argument(key, arg));
        self.state.hovered = Some(key);
        self.animate_radius(key, self.config.markers.hover_radius, now_ms);
        self.tooltip.as_ref()
    }

    /// Position the visible tooltip for a pointer at `pointer` (page
    /// coordinates), given the tooltip's measured size and the viewport size.
    pub fn place_tooltip(&mut self, pointer: Point, size: Size, viewport: Size) -> Option<Point> {
        let cfg = self.config.tooltip;
        let tip = self.tooltip.as_mut()?;
        let p = tooltip::place(pointer, size, viewport, &cfg);
        tip.position = Some(p);
        Some(p)
    }

    pub fn pointer_leave(&mut self, key: ArgumentKey, now_ms: f64) {
        self.tooltip = None;
        self.state.hovered = None;
        self.animate_radius(key, self.config.markers.radius, now_ms);
    }

    /// Clicking a marker has no visible effect yet.
    pub fn click_marker(&self, key: ArgumentKey) {
        match self.dataset.argument(key) {
            Some(arg) => tracing::debug!(arg = %key, text = %arg.argument, "marker clicked"),
            None => tracing::debug!(arg = %key, "click on unknown marker"),
        }
    }

    /// Topmost interactive marker under a surface point, after undoing the
    /// current pan/zoom.
    pub fn marker_at(&self, screen: Point) -> Option<ArgumentKey> {
        let surface = self.surface.as_ref()?;
        let layer = self.state.transform.invert(screen);
        let selection = self.state.selection;
        surface.scene.hit_test(layer, |c| selection.admits(c))
    }

    fn current_radius(&self, key: ArgumentKey, now_ms: f64) -> f64 {
        self.radius_anim
            .value(&key, now_ms)
            .or_else(|| self.radii.get(&key).copied())
            .unwrap_or(self.config.markers.radius)
    }

    fn animate_radius(&mut self, key: ArgumentKey, target: f64, now_ms: f64) {
        let from = self.current_radius(key, now_ms);
        if from == target && !self.radius_anim.is_running(&key) {
            return;
        }
        self.radius_anim.schedule(
            key,
            Transition::new(from, target, now_ms, self.config.timing.hover_ms),
        );
    }

    fn clear_hover_state(&mut self) {
        self.tooltip = None;
        self.state.hovered = None;
        self.radii.clear();
        self.radius_anim.clear();
    }

    // ── selection ────────────────────────────────────────────────────────

    /// Sidebar click on a cluster entry: toggles the selection. Unknown ids
    /// are ignored.
    pub fn click_cluster(&mut self, id: ClusterId, now_ms: f64) -> Selection {
        if !self.dataset.contains_cluster(id) {
            tracing::warn!(cluster = %id, "click on unknown cluster ignored");
            return self.state.selection;
        }
        self.set_selection(self.state.selection.toggled(id), now_ms);
        self.state.selection
    }

    /// Sidebar "show all" entry.
    pub fn show_all(&mut self, now_ms: f64) {
        self.set_selection(Selection::None, now_ms);
    }

    fn set_selection(&mut self, selection: Selection, now_ms: f64) {
        self.state.selection = selection;
        tracing::debug!(?selection, "selection changed");

        // A hovered marker that just became non-interactive will never see
        // its pointer-leave.
        if let Some(h) = self.state.hovered {
            if !selection.admits(h.cluster) {
                self.pointer_leave(h, now_ms);
            }
        }
    }

    // ── pan / zoom ───────────────────────────────────────────────────────

    /// Zoom by `factor` about `anchor` (surface coordinates). Interrupts a
    /// running zoom reset.
    pub fn zoom_at(&mut self, anchor: Point, factor: f64) {
        self.zoom_anim = None;
        self.state.transform = self
            .state
            .transform
            .scaled_at(anchor, factor, &self.config.zoom);
    }

    pub fn wheel(&mut self, anchor: Point, delta_y: f64, delta_mode: u32) {
        let factor = wheel_factor(delta_y, delta_mode, &self.config.zoom);
        self.zoom_at(anchor, factor);
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.zoom_anim = None;
        self.state.transform = self.state.transform.translated(dx, dy);
    }

    /// Animate the transform back to identity.
    pub fn reset_zoom(&mut self, now_ms: f64) {
        let from = self.state.transform;
        if from.is_identity() && self.zoom_anim.is_none() {
            return;
        }
        self.zoom_anim = Some(Transition::new(
            from,
            ZoomTransform::IDENTITY,
            now_ms,
            self.config.timing.zoom_reset_ms,
        ));
    }

    // ── read side ────────────────────────────────────────────────────────

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn preprocess_report(&self) -> &PreprocessReport {
        &self.preprocess
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn selection(&self) -> Selection {
        self.state.selection
    }

    pub fn hovered(&self) -> Option<ArgumentKey> {
        self.state.hovered
    }

    pub fn transform(&self) -> ZoomTransform {
        self.state.transform
    }

    pub fn status(&self) -> ViewStatus {
        self.status
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    pub fn sidebar(&self) -> Vec<SidebarEntry> {
        sidebar::entries(&self.dataset, self.state.selection, &self.config.sidebar)
    }

    /// Settled marker radius as of the last tick.
    pub fn marker_radius(&self, key: ArgumentKey) -> f64 {
        self.radii
            .get(&key)
            .copied()
            .unwrap_or(self.config.markers.radius)
    }

    pub fn marker_views(&self) -> Vec<MarkerView> {
        let Some(surface) = &self.surface else {
            return Vec::new();
        };
        let style = &self.config.markers;
        surface
            .scene
            .markers
            .iter()
            .map(|m| {
                let v = marker_visual(m.cluster(), self.state.selection, style);
                MarkerView {
                    key: m.key,
                    dom_id: m.key.to_string(),
                    center: m.center,
                    radius: self.marker_radius(m.key),
                    fill: m.fill.clone(),
                    opacity: v.opacity,
                    interactive: v.interactive,
                }
            })
            .collect()
    }

    pub fn hit_target_views(&self) -> Vec<HitTargetView> {
        let Some(surface) = &self.surface else {
            return Vec::new();
        };
        surface
            .scene
            .hit_targets
            .iter()
            .map(|h| HitTargetView {
                key: h.key,
                dom_id: h.key.to_string(),
                center: h.center,
                radius: h.radius,
                interactive: self.state.selection.admits(h.key.cluster),
            })
            .collect()
    }

    pub fn label_views(&self) -> Vec<LabelView> {
        let Some(surface) = &self.surface else {
            return Vec::new();
        };
        let style = &self.config.markers;
        surface
            .scene
            .labels
            .iter()
            .map(|l| LabelView {
                cluster: l.cluster,
                position: l.position,
                text: l.text.clone(),
                fill: l.fill.clone(),
                opacity: label_opacity(l.cluster, self.state.selection, style),
            })
            .collect()
    }
}
