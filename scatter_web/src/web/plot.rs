use leptos::ev;
use leptos::html;
use leptos::leptos_dom::helpers::window_event_listener;
use leptos::prelude::*;
use scatter::controller::HitTargetView;
use scatter::prelude::*;

use super::float_fmt::fmt_attr;
use super::tooltip::{self, TooltipPortal};
use super::{now_ms, ViewHandle};

const SURFACE_ID: &str = "scatter-plot";

#[component]
pub(super) fn ScatterPlot(handle: ViewHandle) -> impl IntoView {
    let wrapper_ref: NodeRef<html::Div> = NodeRef::new();
    let tooltip_ref: NodeRef<html::Div> = NodeRef::new();
    let (anchor_error, set_anchor_error) = signal(None::<&'static str>);
    let drag = StoredValue::new(None::<(i32, i32)>);

    // Mount once both anchors exist.
    Effect::new(move |_| {
        let (Some(wrapper), true) = (wrapper_ref.get(), surface_present()) else {
            tracing::error!("scatter container or drawing surface not found");
            set_anchor_error.set(Some("Plot container not found."));
            return;
        };
        set_anchor_error.set(None);
        let size = container_size(&wrapper, handle);
        handle.update(|v| {
            // Failures are logged by `mount` and shown via the status.
            let _ = v.mount(size);
        });
    });

    let resize = window_event_listener(ev::resize, move |_| {
        let Some(wrapper) = wrapper_ref.get_untracked() else {
            return;
        };
        let size = container_size(&wrapper, handle);
        let now = now_ms();
        handle.update(|v| v.request_resize(now, size));
    });
    on_cleanup(move || resize.remove());

    let size = Memo::new(move |_| {
        handle.track();
        handle.with(|v| v.surface().map(|s| s.mapper.size()))
    });
    let markers = Memo::new(move |_| {
        handle.track();
        handle.with(|v| v.marker_views())
    });
    let hit_targets = Memo::new(move |_| {
        handle.track();
        handle.with(|v| v.hit_target_views())
    });
    let labels = Memo::new(move |_| {
        handle.track();
        handle.with(|v| v.label_views())
    });
    let transform = move || {
        handle.track_transform();
        let t = handle.with(|v| v.transform());
        format!("translate({},{}) scale({})", fmt_attr(t.x), fmt_attr(t.y), fmt_attr(t.k))
    };
    let placeholder = move || {
        handle.track();
        anchor_error.get().or_else(|| handle.with(|v| v.status().message()))
    };

    let on_wheel = move |ev: web_sys::WheelEvent| {
        ev.prevent_default();
        let Some(anchor) = surface_point(wrapper_ref, ev.client_x(), ev.client_y()) else {
            return;
        };
        handle.update_transform(|v| v.wheel(anchor, ev.delta_y(), ev.delta_mode()));
    };
    let on_mousedown = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        drag.set_value(Some((ev.client_x(), ev.client_y())));
    };
    let on_mousemove = move |ev: web_sys::MouseEvent| {
        let Some((x0, y0)) = drag.get_value() else {
            return;
        };
        let (x, y) = (ev.client_x(), ev.client_y());
        drag.set_value(Some((x, y)));
        handle.update_transform(|v| v.pan_by(f64::from(x - x0), f64::from(y - y0)));
    };
    let end_drag = move |_: web_sys::MouseEvent| drag.set_value(None);
    let on_reset = move |_: web_sys::MouseEvent| {
        let now = now_ms();
        handle.update(|v| v.reset_zoom(now));
    };

    view! {
        <div id="scatter-wrapper" class="scatter-wrapper" node_ref=wrapper_ref>
            <svg
                id=SURFACE_ID
                width=move || size.get().map(|s| fmt_attr(s.width))
                height=move || size.get().map(|s| fmt_attr(s.height))
                on:wheel=on_wheel
                on:mousedown=on_mousedown
                on:mousemove=on_mousemove
                on:mouseup=end_drag
                on:mouseleave=end_drag
            >
                <g class="main-group" transform=transform>
                    <g class="point-group">
                        <For
                            each=move || {
                                markers.with(|ms| ms.iter().enumerate().map(|(i, m)| (i, m.key)).collect::<Vec<_>>())
                            }
                            key=|item| *item
                            children=move |(i, key)| marker_circle(i, key, markers, handle, tooltip_ref)
                        />
                        <For
                            each=move || {
                                hit_targets
                                    .with(|hs| hs.iter().enumerate().map(|(i, h)| (i, h.key)).collect::<Vec<_>>())
                            }
                            key=|item| *item
                            children=move |(i, key)| hit_circle(i, key, hit_targets, handle, tooltip_ref)
                        />
                    </g>
                    <g class="label-group">
                        <For
                            each=move || {
                                labels.with(|ls| ls.iter().enumerate().map(|(i, l)| (i, l.cluster)).collect::<Vec<_>>())
                            }
                            key=|item| *item
                            children=move |(i, _)| cluster_label(i, labels)
                        />
                    </g>
                </g>
            </svg>
            <div class="controls">
                <button id="reset-zoom" class="reset-zoom" on:click=on_reset>"Reset zoom"</button>
            </div>
            {move || placeholder().map(|m| view! { <div class="placeholder">{m}</div> })}
            <TooltipPortal handle=handle anchor=tooltip_ref />
        </div>
    }
}

fn marker_circle(
    i: usize,
    key: ArgumentKey,
    markers: Memo<Vec<MarkerView>>,
    handle: ViewHandle,
    tip: NodeRef<html::Div>,
) -> impl IntoView {
    let attr = move |f: fn(&MarkerView) -> String| {
        move || markers.with(|ms| ms.get(i).map(f).unwrap_or_default())
    };

    view! {
        <circle
            class="dot"
            data-arg-id=key.to_string()
            data-cluster-id=key.cluster.to_string()
            cx=attr(|m| fmt_attr(m.center.x))
            cy=attr(|m| fmt_attr(m.center.y))
            r=attr(|m| fmt_attr(m.radius))
            style=attr(|m| {
                format!(
                    "fill: {}; opacity: {}; pointer-events: {}; cursor: pointer;",
                    m.fill,
                    fmt_attr(m.opacity),
                    pointer_events(m.interactive)
                )
            })
            on:mouseenter=move |ev: web_sys::MouseEvent| tooltip::show(handle, tip, key, page_point(&ev))
            on:mouseleave=move |_| tooltip::hide(handle, key)
            on:click=move |_| handle.with(|v| v.click_marker(key))
        />
    }
}

/// Invisible enlarged circle over each marker so small markers are easy to hover.
fn hit_circle(
    i: usize,
    key: ArgumentKey,
    targets: Memo<Vec<HitTargetView>>,
    handle: ViewHandle,
    tip: NodeRef<html::Div>,
) -> impl IntoView {
    let attr = move |f: fn(&HitTargetView) -> String| {
        move || targets.with(|ts| ts.get(i).map(f).unwrap_or_default())
    };

    view! {
        <circle
            class="dot-hitarea"
            data-arg-id=key.to_string()
            data-cluster-id=key.cluster.to_string()
            cx=attr(|h| fmt_attr(h.center.x))
            cy=attr(|h| fmt_attr(h.center.y))
            r=attr(|h| fmt_attr(h.radius))
            style=attr(|h| {
                format!("fill: transparent; pointer-events: {}; cursor: pointer;", pointer_events(h.interactive))
            })
            on:mouseenter=move |ev: web_sys::MouseEvent| tooltip::show(handle, tip, key, page_point(&ev))
            on:mouseleave=move |_| tooltip::hide(handle, key)
            on:click=move |_| handle.with(|v| v.click_marker(key))
        />
    }
}

fn cluster_label(i: usize, labels: Memo<Vec<LabelView>>) -> impl IntoView {
    let attr = move |f: fn(&LabelView) -> String| {
        move || labels.with(|ls| ls.get(i).map(f).unwrap_or_default())
    };

    view! {
        <text
            class="cluster-label"
            data-cluster-id=attr(|l| l.cluster.to_string())
            x=attr(|l| fmt_attr(l.position.x))
            y=attr(|l| fmt_attr(l.position.y))
            text-anchor="middle"
            style=attr(|l| {
                format!(
                    "fill: {}; opacity: {}; font-weight: bold; pointer-events: none;",
                    l.fill,
                    fmt_attr(l.opacity)
                )
            })
        >
            {attr(|l| l.text.clone())}
        </text>
    }
}

fn pointer_events(interactive: bool) -> &'static str {
    if interactive {
        "all"
    } else {
        "none"
    }
}

fn page_point(ev: &web_sys::MouseEvent) -> Point {
    Point::new(f64::from(ev.page_x()), f64::from(ev.page_y()))
}

fn surface_present() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(SURFACE_ID))
        .is_some()
}

fn container_size(wrapper: &web_sys::HtmlDivElement, handle: ViewHandle) -> Size {
    let rect = wrapper.get_bounding_client_rect();
    handle.with(|v| v.config().layout.surface_size(rect.width(), rect.height()))
}

/// Client coordinates relative to the drawing surface's top-left corner.
fn surface_point(wrapper: NodeRef<html::Div>, client_x: i32, client_y: i32) -> Option<Point> {
    let rect = wrapper.get_untracked()?.get_bounding_client_rect();
    Some(Point::new(
        f64::from(client_x) - rect.left(),
        f64::from(client_y) - rect.top(),
    ))
}
