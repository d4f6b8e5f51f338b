use leptos::prelude::*;

/// One headline figure of the dashboard.
#[component]
pub fn StatCard(
    /// Label displayed above the value
    #[prop(into)]
    label: String,
    /// Already formatted value
    #[prop(into)]
    value: String,
) -> impl IntoView {
    view! {
        <div class="stat-card">
            <div class="stat-card__header">
                <span class="stat-card__label">{label}</span>
            </div>
            <div class="stat-card__value">{value}</div>
        </div>
    }
}
