use leptos::html;
use leptos::leptos_dom::helpers::request_animation_frame;
use leptos::prelude::*;
use scatter::prelude::*;

use super::float_fmt::fmt_px;
use super::{now_ms, ViewHandle};

/// Renders the controller's current tooltip. A freshly shown tooltip is
/// hidden until [`show`] has measured and placed it.
#[component]
pub(super) fn TooltipPortal(handle: ViewHandle, anchor: NodeRef<html::Div>) -> impl IntoView {
    let payload = Memo::new(move |_| {
        handle.track();
        handle.with(|v| v.tooltip().cloned())
    });

    view! {
        <Show when=move || payload.with(Option::is_some) fallback=|| ()>
            {move || {
                payload
                    .get()
                    .map(|tip| {
                        let style = match tip.position {
                            Some(p) => {
                                format!("display: block; left: {}; top: {};", fmt_px(p.x), fmt_px(p.y))
                            }
                            None => "display: block; left: 0px; top: 0px; visibility: hidden;".to_string(),
                        };
                        view! {
                            <div id="tooltip" class="tooltip" role="tooltip" style=style node_ref=anchor>
                                <div class="tooltip-content">{tip.body}</div>
                                {tip.meta.map(|m| view! { <div class="tooltip-meta">{m}</div> })}
                            </div>
                        }
                    })
            }}
        </Show>
    }
}

/// Hover entered `key` with the pointer at `pointer` (page coordinates).
pub(super) fn show(handle: ViewHandle, anchor: NodeRef<html::Div>, key: ArgumentKey, pointer: Point) {
    let now = now_ms();
    let shown = handle.update(|v| v.pointer_enter(key, now).is_some());
    if shown != Some(true) {
        return;
    }

    // Measure once the hidden tooltip has been rendered.
    request_animation_frame(move || {
        let Some(el) = anchor.get_untracked() else {
            return;
        };
        let rect = el.get_bounding_client_rect();
        let size = Size::new(rect.width(), rect.height());
        let viewport = viewport_size();
        handle.update(|v| {
            if v.hovered() == Some(key) {
                v.place_tooltip(pointer, size, viewport);
            }
        });
    });
}

pub(super) fn hide(handle: ViewHandle, key: ArgumentKey) {
    let now = now_ms();
    handle.update(|v| v.pointer_leave(key, now));
}

fn viewport_size() -> Size {
    let Some(window) = web_sys::window() else {
        return Size::new(0.0, 0.0);
    };
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    Size::new(dim(window.inner_width()), dim(window.inner_height()))
}
