//! Administrator dashboard: headline figures from `/dashboard/summary`.

use contracts::shared::endpoints;
use leptos::prelude::*;
use serde_json::Value;
use wasm_bindgen_futures::spawn_local;

use crate::shared::api::{use_api, CancelToken, RequestOptions};
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::stat_card::StatCard;
use crate::shared::format::summary_cards;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let api = use_api();
    let notifications = use_notifications();
    let cancel = CancelToken::scoped();

    let cards = RwSignal::new(Vec::<(String, String)>::new());
    let loading = RwSignal::new(false);

    let fetch = Callback::new(move |()| {
        let api = api.clone();
        let cancel = cancel.clone();
        loading.set(true);
        spawn_local(async move {
            match api
                .get::<Value>(endpoints::DASHBOARD_SUMMARY, RequestOptions::cancellable(&cancel))
                .await
            {
                Ok(summary) => cards.set(summary_cards(&summary)),
                Err(e) if e.is_cancelled() => return,
                Err(e) => {
                    log::warn!("Dashboard summary failed: {}", e);
                    notifications.api_error(&e);
                }
            }
            loading.set(false);
        });
    });

    fetch.run(());

    view! {
        <div class="page">
            <PageHeader title="Tableau de bord">
                <button
                    class="button button--secondary"
                    on:click=move |_| fetch.run(())
                    disabled=move || loading.get()
                >
                    {icon("refresh")}
                    "Actualiser"
                </button>
            </PageHeader>

            <div class="stat-cards">
                <For
                    each=move || cards.get()
                    key=|(label, value)| format!("{}={}", label, value)
                    children=|(label, value)| view! { <StatCard label=label value=value /> }
                />
            </div>
        </div>
    }
}
