use dioxus::prelude::*;
use dioxus_router::use_navigator;

use audit_core::model::{Restaurant, RestaurantFilter, StatusFilter};
use services::Selection;

use crate::context::{AppContext, WeekRefresh, use_translator};
use crate::routes::Route;
use crate::views::schedule::ScheduleVisitForm;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    DashboardVm, RestaurantCardVm, blocked_message, map_restaurant_cards, resume_prompt,
};

const FILTERS: [(&str, &str); 3] = [("all", "All"), ("active", "Active"), ("inactive", "Inactive")];

#[component]
pub fn RestaurantsView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let t = use_translator();
    let today = ctx.clock().today();
    let restaurants = ctx.restaurants();
    let week = use_context::<WeekRefresh>();

    let mut filter_button = use_signal(|| "all");
    let mut search = use_signal(String::new);
    let mut notice = use_signal(|| None::<String>);
    let mut resume = use_signal(|| None::<Restaurant>);
    let mut scheduling = use_signal(|| None::<Restaurant>);

    let dashboard = {
        let restaurants = restaurants.clone();
        use_resource(move || {
            let restaurants = restaurants.clone();
            async move {
                let dashboard = restaurants.dashboard().await.map_err(ViewError::from)?;
                Ok::<_, ViewError>(DashboardVm::from(&dashboard))
            }
        })
    };

    let list = {
        let restaurants = restaurants.clone();
        use_resource(move || {
            let restaurants = restaurants.clone();
            let _ = week.current();
            async move {
                restaurants
                    .restaurants_with_week_status()
                    .await
                    .map_err(ViewError::from)
            }
        })
    };

    let select = {
        let restaurants = restaurants.clone();
        use_callback(move |card: RestaurantCardVm| {
            if !card.clickable {
                notice.set(blocked_message(&card.restaurant.access()));
                return;
            }
            let restaurants = restaurants.clone();
            spawn(async move {
                match restaurants.select(&card.restaurant).await {
                    Ok(Selection::Start) => {
                        let _ = navigator.push(Route::Audit {});
                    }
                    Ok(Selection::ResumeOrRestart) => resume.set(Some(card.restaurant)),
                    Ok(Selection::Blocked(access)) => notice.set(blocked_message(&access)),
                    Err(err) => notice.set(Some(err.user_message())),
                }
            });
        })
    };

    let start_fresh = use_callback(move |()| {
        let Some(restaurant) = resume.write().take() else {
            return;
        };
        let restaurants = restaurants.clone();
        spawn(async move {
            restaurants.start_fresh(&restaurant).await;
            let _ = navigator.push(Route::Audit {});
        });
    });

    let dashboard_state = view_state_from_resource(&dashboard);
    let list_state = view_state_from_resource(&list);
    let filter = RestaurantFilter::new(StatusFilter::from_button(filter_button()), search());
    let cards = match &list_state {
        ViewState::Ready(all) => map_restaurant_cards(all, &filter, today),
        _ => Vec::new(),
    };

    rsx! {
        div { class: "page restaurants",
            match dashboard_state {
                ViewState::Ready(vm) => rsx! { DashboardHeader { vm } },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
                ViewState::Idle | ViewState::Loading => rsx! {},
            }

            h2 { {t("Restaurants")} }

            div { class: "filters",
                for (value, label) in FILTERS {
                    button {
                        class: if filter_button() == value { "filter-btn active" } else { "filter-btn" },
                        onclick: move |_| filter_button.set(value),
                        {t(label)}
                    }
                }
                input {
                    r#type: "search",
                    placeholder: t("Search"),
                    value: "{search}",
                    oninput: move |evt| search.set(evt.value()),
                }
            }

            if let Some(message) = notice() {
                div { class: "notice alert",
                    p { "{message}" }
                    button { onclick: move |_| notice.set(None), {t("OK")} }
                }
            }

            match list_state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { {t("Loading...")} }
                },
                ViewState::Ready(all) => rsx! {
                    if all.is_empty() {
                        div { class: "empty-state",
                            h3 { {t("No Restaurants Assigned")} }
                        }
                    } else if cards.is_empty() {
                        div { class: "empty-state",
                            h3 { {t("No Results Found")} }
                            p { {t("No restaurants match your current filter and search criteria.")} }
                        }
                    } else {
                        div { class: "cards",
                            for card in cards {
                                RestaurantCard {
                                    key: "{card.id}",
                                    card: card.clone(),
                                    on_select: move |card| select.call(card),
                                    on_schedule: move |restaurant| scheduling.set(Some(restaurant)),
                                }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }

            if let Some(restaurant) = resume() {
                div { class: "modal-backdrop",
                    div { class: "card modal progress-modal",
                        h3 { {t("Saved Progress Found")} }
                        p { {resume_prompt(&restaurant)} }
                        div { class: "modal-actions",
                            button {
                                onclick: move |_| {
                                    resume.set(None);
                                    let _ = navigator.push(Route::Audit {});
                                },
                                {t("Continue")}
                            }
                            button { onclick: move |_| start_fresh.call(()), {t("Start Fresh")} }
                        }
                    }
                }
            }

            if let Some(restaurant) = scheduling() {
                div { class: "modal-backdrop",
                    div { class: "card modal",
                        ScheduleVisitForm {
                            restaurant: restaurant.id.clone(),
                            restaurant_name: restaurant.display_name.clone(),
                            on_close: move |()| scheduling.set(None),
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn DashboardHeader(vm: DashboardVm) -> Element {
    let t = use_translator();
    rsx! {
        div { class: "dashboard-header",
            div { class: "avatar", "{vm.initial}" }
            div {
                h3 { "{vm.display_name}" }
                if let Some(designation) = vm.designation.as_deref() {
                    p { class: "notice", "{designation}" }
                }
            }
            span { class: "stat", {t("Total Audits")} ": {vm.total_audits}" }
            span { class: "stat", {t("Average Score")} ": {vm.avg_score}" }
            if vm.pending_count > 0 {
                span { class: "stat", {t("Pending")} ": {vm.pending_count}" }
            }
        }
    }
}

#[component]
fn RestaurantCard(
    card: RestaurantCardVm,
    on_select: EventHandler<RestaurantCardVm>,
    on_schedule: EventHandler<Restaurant>,
) -> Element {
    let t = use_translator();
    let class = card.card_class();
    let status_class = format!("badge {}", card.status);
    let clicked = card.clone();
    let restaurant = card.restaurant.clone();

    rsx! {
        div { class: "{class}", onclick: move |_| on_select.call(clicked.clone()),
            if card.has_progress {
                div { class: "progress-indicator", "!" }
            }
            if card.week_complete {
                div { class: "week-status-indicator", "✅ " {t("Week Complete")} }
            } else {
                div { class: "week-status-indicator available", "📝 " {t("Available")} }
            }
            div { class: "restaurant-header",
                h3 { "{card.name}" }
                if card.clickable {
                    button {
                        class: "schedule-visit-btn",
                        title: t("Schedule Visit"),
                        onclick: move |evt| {
                            evt.stop_propagation();
                            on_schedule.call(restaurant.clone());
                        },
                        "+"
                    }
                }
                span { class: "{status_class}", "{card.status}" }
            }
            if let Some(message) = card.week_message.as_deref().filter(|_| card.week_complete) {
                p { class: "week-message", "{message}" }
            }
            p { class: "restaurant-address", "{card.address}" }
            p { class: "restaurant-employee", strong { {t("Auditor")} ": " } "{card.auditor}" }
            p {
                span { class: "stat", {t("Total Audits")} ": {card.total_audits}" }
                span { class: "stat", {t("My Audits")} ": {card.my_audits}" }
            }
            p { class: "restaurant-meta",
                span { class: "stat", "{card.radius_label}" }
                span { {t("Last audit")} ": {card.last_audit}" }
            }
            if let Some(next) = card.next_access.as_deref() {
                p { class: "next-access-info", "📅 " {t("Next access")} ": {next}" }
            }
        }
    }
}
