use leptos::prelude::*;
use scatter::prelude::*;

use super::{now_ms, ViewHandle};

#[component]
pub(super) fn ClusterList(handle: ViewHandle) -> impl IntoView {
    let entries = Memo::new(move |_| {
        handle.track();
        handle.with(|v| v.sidebar())
    });

    view! {
        <div id="cluster-list" class="cluster-list">
            <For
                each=move || entries.get().into_iter().enumerate()
                key=|(i, e)| (*i, e.kind, e.active)
                children=move |(_, e)| entry_view(e, handle)
            />
        </div>
    }
}

fn entry_view(entry: SidebarEntry, handle: ViewHandle) -> impl IntoView {
    let kind = entry.kind;
    let class = match (kind, entry.active) {
        (EntryKind::ShowAll, true) => "cluster-item show-all active",
        (EntryKind::ShowAll, false) => "cluster-item show-all",
        (EntryKind::Cluster(_), true) => "cluster-item active",
        (EntryKind::Cluster(_), false) => "cluster-item",
    };
    let cluster_id = entry.cluster().map(|c| c.0.to_string());
    let title_style = entry.color.map(|c| format!("color: {c};")).unwrap_or_default();
    let count = (!entry.count.is_empty()).then_some(entry.count);
    let takeaway = (!entry.takeaway.is_empty()).then_some(entry.takeaway);

    let on_click = move |_: web_sys::MouseEvent| {
        let now = now_ms();
        handle.update(|v| match kind {
            EntryKind::ShowAll => v.show_all(now),
            EntryKind::Cluster(id) => {
                v.click_cluster(id, now);
            }
        });
    };

    view! {
        <div class=class data-cluster-id=cluster_id on:click=on_click>
            <div class="cluster-title" style=title_style>{entry.title}</div>
            {count.map(|c| view! { <div class="cluster-count">{c}</div> })}
            {takeaway.map(|t| view! { <div class="cluster-takeaway">{t}</div> })}
        </div>
    }
}
