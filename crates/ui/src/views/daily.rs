use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use audit_core::model::TemplateName;

use crate::context::{AppContext, use_translator};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{DailySessionVm, DailyTemplateCardVm, map_daily_template_cards};

#[component]
pub fn DailyAuditsView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let t = use_translator();
    let clock = ctx.clock();
    let daily_audits = ctx.daily_audits();

    let mut notice = use_signal(|| None::<String>);
    let mut starting = use_signal(|| None::<TemplateName>);

    let resource = {
        let daily_audits = daily_audits.clone();
        use_resource(move || {
            let daily_audits = daily_audits.clone();
            async move {
                let templates = daily_audits.templates().await.map_err(ViewError::from)?;
                Ok::<_, ViewError>(map_daily_template_cards(
                    &templates,
                    clock.time_of_day(),
                ))
            }
        })
    };

    let start = use_callback(move |name: TemplateName| {
        if starting().is_some() {
            return;
        }
        starting.set(Some(name.clone()));
        let daily_audits = daily_audits.clone();
        spawn(async move {
            match daily_audits.start(&name).await {
                Ok(_) => {
                    let _ = navigator.push(Route::DailyAuditSession {});
                }
                Err(err) => notice.set(Some(err.user_message())),
            }
            starting.set(None);
        });
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page daily",
            h2 { {t("Daily Audits")} }

            if let Some(message) = notice() {
                div { class: "notice alert",
                    p { "{message}" }
                    button { onclick: move |_| notice.set(None), {t("OK")} }
                }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { {t("Loading...")} }
                },
                ViewState::Ready(cards) => rsx! {
                    if cards.is_empty() {
                        p { {t("No daily audit templates are active.")} }
                    } else {
                        div { class: "cards",
                            for card in cards {
                                TemplateCard {
                                    key: "{card.name}",
                                    busy: starting().is_some(),
                                    card,
                                    on_start: move |name| start.call(name),
                                }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn TemplateCard(card: DailyTemplateCardVm, busy: bool, on_start: EventHandler<TemplateName>) -> Element {
    let t = use_translator();
    let name = card.name.clone();
    rsx! {
        div { class: "card template-card",
            div { class: "restaurant-header",
                h3 { "{card.title}" }
                span { class: card.badge_class(), {t(&card.status)} }
            }
            if let Some(description) = card.description.as_deref() {
                p { "{description}" }
            }
            if !card.restaurant.is_empty() {
                p { class: "notice", "{card.restaurant}" }
            }
            p {
                span { class: "stat", {t("Window")} ": {card.window}" }
                span { class: "stat", {t("Cashier opens")} ": {card.cashier_opens}" }
            }
            p {
                span { class: "stat", {t("Questions")} ": {card.questions}" }
                if let Some(duration) = card.duration.as_deref() {
                    span { class: "stat", "⏱ {duration}" }
                }
                if let Some(priority) = card.priority.as_deref() {
                    span { class: "badge", "{priority}" }
                }
            }
            button {
                disabled: busy || !card.open,
                onclick: move |_| on_start.call(name.clone()),
                {t("Start Audit")}
            }
        }
    }
}

#[component]
pub fn DailyAuditSessionView() -> Element {
    let ctx = use_context::<AppContext>();
    let t = use_translator();
    let daily_audits = ctx.daily_audits();

    let resource = use_resource(move || {
        let daily_audits = daily_audits.clone();
        async move {
            let current = daily_audits.current().await.map_err(ViewError::from)?;
            Ok::<_, ViewError>(current.as_ref().map(DailySessionVm::from))
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page daily-session",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { {t("Loading...")} }
                },
                ViewState::Ready(Some(vm)) => rsx! {
                    h2 { "{vm.title}" }
                    p { {t("Questions")} ": {vm.questions}" }
                    if let Some(restaurant) = vm.restaurant.as_deref() {
                        p { {t("Restaurant")} ": {restaurant}" }
                    }
                    if let Some(progress) = vm.progress.as_deref() {
                        p { class: "notice", {t("Progress")} ": {progress}" }
                    }
                },
                ViewState::Ready(None) => rsx! {
                    p { {t("No daily audit in progress.")} }
                    Link { to: Route::DailyAudits {}, {t("Daily Audits")} }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }
        }
    }
}
