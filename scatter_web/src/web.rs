use leptos::leptos_dom::helpers::request_animation_frame;
use leptos::prelude::*;
use scatter::prelude::*;

mod console;
mod float_fmt;
mod plot;
mod sidebar;
mod tooltip;

use plot::ScatterPlot;
use sidebar::ClusterList;

/// `<script type="application/json">` element carrying the report dataset.
const DATA_ELEMENT_ID: &str = "report-data";

pub fn start() {
    console::init_tracing();
    mount_to_body(|| view! { <App /> });
}

/// Shared access to the controller plus revision counters that views track.
///
/// Scene visuals (markers, labels, sidebar, tooltip) follow `frame`; the
/// layer transform follows `transform_rev` alone, so pan and zoom gestures go
/// through [`ViewHandle::update_transform`] and leave the marker lists alone.
/// Every mutation keeps the animation-frame loop running while the
/// controller still has work (transitions or a pending resize).
#[derive(Clone, Copy)]
pub(super) struct ViewHandle {
    view: StoredValue<ScatterView>,
    frame: RwSignal<u64>,
    transform_rev: RwSignal<u64>,
    ticking: StoredValue<bool>,
}

impl ViewHandle {
    fn new(view: ScatterView) -> Self {
        Self {
            view: StoredValue::new(view),
            frame: RwSignal::new(0),
            transform_rev: RwSignal::new(0),
            ticking: StoredValue::new(false),
        }
    }

    /// Subscribe the current reactive scope to scene changes.
    pub(super) fn track(self) {
        self.frame.track();
    }

    /// Subscribe the current reactive scope to pan/zoom changes.
    pub(super) fn track_transform(self) {
        self.transform_rev.track();
    }

    pub(super) fn with<R>(self, f: impl FnOnce(&ScatterView) -> R) -> R {
        self.view.with_value(f)
    }

    pub(super) fn update<R>(self, f: impl FnOnce(&mut ScatterView) -> R) -> Option<R> {
        let mut out = None;
        self.view.update_value(|v| out = Some(f(v)));
        self.frame.update(|n| *n += 1);
        self.transform_rev.update(|n| *n += 1);
        self.ensure_ticking();
        out
    }

    /// Mutation that only moves the layer transform.
    pub(super) fn update_transform(self, f: impl FnOnce(&mut ScatterView)) {
        self.view.update_value(f);
        self.transform_rev.update(|n| *n += 1);
        self.ensure_ticking();
    }

    fn ensure_ticking(self) {
        if self.ticking.get_value() || !self.with(|v| v.needs_tick()) {
            return;
        }
        self.ticking.set_value(true);
        schedule_frame(self);
    }
}

fn schedule_frame(handle: ViewHandle) {
    request_animation_frame(move || {
        let now = now_ms();
        let mut more = false;
        handle.view.update_value(|v| {
            let out = v.tick(now);
            if out.rebuilt {
                tracing::debug!("surface rebuilt after resize");
            }
            more = out.animating;
        });
        handle.frame.update(|n| *n += 1);
        handle.transform_rev.update(|n| *n += 1);
        if more {
            schedule_frame(handle);
        } else {
            handle.ticking.set_value(false);
        }
    });
}

/// Monotonic milliseconds from `performance.now()`.
pub(super) fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn load_view() -> Result<ScatterView, String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("no document")?;
    let el = document
        .get_element_by_id(DATA_ELEMENT_ID)
        .ok_or_else(|| format!("missing #{DATA_ELEMENT_ID} element"))?;
    let json = el.text_content().unwrap_or_default();
    let dataset = Dataset::from_json_str(&json).map_err(|e| e.to_string())?;
    ScatterView::new(dataset, ViewConfig::default()).map_err(|e| e.to_string())
}

#[component]
fn App() -> impl IntoView {
    tracing::info!("initializing scatter view");
    match load_view() {
        Ok(view) => view! { <Report handle=ViewHandle::new(view) /> }.into_any(),
        Err(e) => {
            tracing::error!("initialization error: {e}");
            view! {
                <main class="report">
                    <div class="placeholder">{format!("Could not load report: {e}")}</div>
                </main>
            }
            .into_any()
        }
    }
}

#[component]
fn Report(handle: ViewHandle) -> impl IntoView {
    let (title, question, overview) = handle.with(|v| {
        let ds = v.dataset();
        (
            ds.title.clone().unwrap_or_default(),
            ds.question.clone().filter(|q| !q.is_empty()),
            ds.overview.clone().filter(|o| !o.is_empty()),
        )
    });

    view! {
        <main class="report">
            <header class="report-header">
                <h1>{title}</h1>
                {question.map(|q| view! { <p class="question">{q}</p> })}
                {overview.map(|o| view! { <p class="overview">{o}</p> })}
            </header>
            <div class="report-body">
                <aside class="sidebar">
                    <ClusterList handle=handle />
                </aside>
                <section class="plot">
                    <ScatterPlot handle=handle />
                </section>
            </div>
        </main>
    }
}
