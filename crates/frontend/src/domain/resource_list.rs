//! Generic table screen for a catalogue resource.

use contracts::domain::catalog::ResourceDescriptor;
use leptos::prelude::*;
use serde_json::Value;
use wasm_bindgen_futures::spawn_local;

use crate::shared::api::{use_api, CancelToken, RequestOptions};
use crate::shared::components::page_header::PageHeader;
use crate::shared::format::{cell_text, row_id, rows_from};
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::system::auth::context::use_auth;

#[component]
pub fn ResourceListPage(
    resource: ResourceDescriptor,

    #[prop(optional, into)] subtitle: MaybeProp<String>,
) -> impl IntoView {
    let api = use_api();
    let auth = use_auth();
    let notifications = use_notifications();
    // responses arriving after the page is closed are dropped
    let cancel = CancelToken::scoped();

    let items = RwSignal::new(Vec::<Value>::new());
    let error = RwSignal::new(Option::<String>::None);
    let loading = RwSignal::new(false);

    let fetch = Callback::new({
        let api = api.clone();
        let cancel = cancel.clone();
        move |()| {
            let api = api.clone();
            let cancel = cancel.clone();
            loading.set(true);
            spawn_local(async move {
                let result = api
                    .get::<Value>(resource.endpoint, RequestOptions::cancellable(&cancel))
                    .await;
                match result {
                    Ok(body) => {
                        items.set(rows_from(body));
                        error.set(None);
                    }
                    Err(e) if e.is_cancelled() => return,
                    Err(e) => {
                        log::warn!("Loading {} failed: {}", resource.endpoint, e);
                        notifications.api_error(&e);
                        error.set(Some(e.message));
                    }
                }
                loading.set(false);
            });
        }
    });

    let can_delete = move || resource.deletable && auth.role().is_some_and(|r| r.is_admin());

    let delete = Callback::new(move |id: String| {
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message("Supprimer cet élément ?").ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        let api = api.clone();
        let cancel = cancel.clone();
        spawn_local(async move {
            let path = resource.item_endpoint(&id);
            match api.delete(&path, RequestOptions::cancellable(&cancel)).await {
                Ok(()) => {
                    log::info!("Deleted {}", path);
                    notifications.success("Élément supprimé");
                    fetch.run(());
                }
                Err(e) if e.is_cancelled() => {}
                Err(e) => notifications.api_error(&e),
            }
        });
    });

    fetch.run(());

    view! {
        <div class="page">
            <PageHeader title=resource.title subtitle=subtitle>
                <button
                    class="button button--secondary"
                    on:click=move |_| fetch.run(())
                    disabled=move || loading.get()
                >
                    {icon("refresh")}
                    "Actualiser"
                </button>
            </PageHeader>

            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            {move || {
                let rows = items.get();
                if rows.is_empty() {
                    let text = if loading.get() { "Chargement..." } else { "Aucun élément" };
                    return view! { <div class="empty-state">{text}</div> }.into_any();
                }
                let with_actions = can_delete();
                view! {
                    <table class="table">
                        <thead>
                            <tr>
                                {resource.columns.iter().map(|c| view! { <th>{c.label}</th> }).collect_view()}
                                {with_actions.then(|| view! { <th class="table__actions"></th> })}
                            </tr>
                        </thead>
                        <tbody>
                            {rows.into_iter().map(|row| {
                                let id = row_id(&row);
                                view! {
                                    <tr>
                                        {resource.columns.iter().map(|c| view! { <td>{cell_text(&row, c)}</td> }).collect_view()}
                                        {with_actions.then(|| view! {
                                            <td class="table__actions">
                                                {id.map(|id| view! {
                                                    <button
                                                        class="button button--icon"
                                                        title="Supprimer"
                                                        on:click=move |_| delete.run(id.clone())
                                                    >
                                                        {icon("delete")}
                                                    </button>
                                                })}
                                            </td>
                                        })}
                                    </tr>
                                }
                            }).collect_view()}
                        </tbody>
                    </table>
                }.into_any()
            }}
        </div>
    }
}
