use dioxus::prelude::*;
use dioxus_router::Link;
use tracing::warn;

use audit_core::model::{CategoryId, Restaurant};
use services::chat::{DelayOutcome, Playback};
use services::{ChatSession, LocationCheck, WalkerError, WalkerEvent};

use crate::context::{AppContext, use_translator};
use crate::routes::Route;
use crate::views::chat::ChatModal;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{AuditSummaryVm, CategoryCardVm, ChatVm, map_category_cards};

#[derive(Clone, Debug, PartialEq, Eq)]
enum LocationStatus {
    Checking,
    Verified,
    Failed(String),
    Unavailable,
}

#[component]
pub fn AuditView() -> Element {
    let ctx = use_context::<AppContext>();
    let t = use_translator();
    let restaurants = ctx.restaurants();
    let checklists = ctx.checklists();

    let mut chat = use_signal(|| None::<ChatSession>);
    let mut restaurant = use_signal(|| None::<Restaurant>);
    let mut location = use_signal(|| LocationStatus::Checking);
    let mut overall_comment = use_signal(String::new);
    let mut submitting = use_signal(|| false);
    let mut submit_result = use_signal(|| None::<Result<String, String>>);

    let resource = {
        let checklists = checklists.clone();
        let position = ctx.position();
        use_resource(move || {
            let restaurants = restaurants.clone();
            let checklists = checklists.clone();
            async move {
                let selected = restaurants.selected().await.map_err(ViewError::from)?;
                let checklist = checklists
                    .load_checklist(&selected.id)
                    .await
                    .map_err(ViewError::from)?;
                chat.set(Some(ChatSession::interactive(checklist)));
                match position {
                    Some(position) => {
                        let id = selected.id.clone();
                        spawn(async move {
                            let status = match checklists.validate_location(&id, position).await {
                                Ok(LocationCheck::Verified) => LocationStatus::Verified,
                                Ok(LocationCheck::OutOfRange(message)) => {
                                    LocationStatus::Failed(message)
                                }
                                Err(err) => {
                                    warn!(error = %err, "location check failed");
                                    LocationStatus::Failed(err.user_message())
                                }
                            };
                            location.set(status);
                        });
                    }
                    None => location.set(LocationStatus::Unavailable),
                }
                restaurant.set(Some(selected));
                Ok::<_, ViewError>(())
            }
        })
    };

    let send = use_callback(move |event: WalkerEvent| {
        let playback = {
            let mut guard = chat.write();
            let Some(session) = guard.as_mut() else {
                return;
            };
            session.begin(event)
        };
        match playback {
            Ok(Playback {
                pending: Some(pending),
                ..
            }) => {
                spawn(async move {
                    if pending.delay.wait(&pending.canceller).await != DelayOutcome::Elapsed {
                        return;
                    }
                    if let Some(session) = chat.write().as_mut() {
                        if let Err(err) = session.finish() {
                            warn!(error = %err, "chat step not finished");
                        }
                    }
                });
            }
            Ok(_) | Err(WalkerError::InputLocked) => {}
            Err(err) => warn!(error = %err, "chat event rejected"),
        }
    });

    let close_chat = use_callback(move |()| {
        if let Some(session) = chat.write().as_mut() {
            if let Err(err) = session.close() {
                warn!(error = %err, "chat not closed");
            }
        }
    });

    let submit = use_callback(move |()| {
        if submitting() {
            return;
        }
        let Some(selected) = restaurant() else {
            return;
        };
        let Some(checklist) = chat.read().as_ref().map(|s| s.checklist().clone()) else {
            return;
        };
        if !checklist.can_submit() {
            return;
        }
        let checklists = checklists.clone();
        let comment = overall_comment();
        submitting.set(true);
        spawn(async move {
            match checklists
                .submit_audit(&selected.id, &checklist, &comment)
                .await
            {
                Ok(message) => submit_result.set(Some(Ok(message))),
                Err(err) => {
                    submit_result.set(Some(Err(err.user_message())));
                    submitting.set(false);
                }
            }
        });
    });

    let state = view_state_from_resource(&resource);
    let (cards, summary, chat_vm, accepts_input) = match chat.read().as_ref() {
        Some(session) => (
            map_category_cards(session.checklist()),
            Some(AuditSummaryVm::from(session.checklist())),
            ChatVm::from_session(session),
            session.accepts_input(),
        ),
        None => (Vec::new(), None, None, false),
    };
    let submitted = matches!(submit_result(), Some(Ok(_)));

    rsx! {
        div { class: "page audit",
            Link { to: Route::Restaurants {}, "← " {t("Back")} }

            if let Some(selected) = restaurant() {
                h2 { "{selected.display_name}" }
            }
            LocationBadge { status: location() }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { {t("Loading...")} }
                },
                ViewState::Ready(()) => rsx! {
                    if let Some(summary) = summary {
                        SummaryPanel { summary: summary.clone() }
                        div { class: "cards category-grid",
                            for card in cards {
                                CategoryCard {
                                    key: "{card.id}",
                                    card,
                                    enabled: accepts_input && !submitted,
                                    on_open: move |id| send.call(WalkerEvent::OpenCategory(id)),
                                }
                            }
                        }
                        div { class: "overall",
                            textarea {
                                placeholder: t("Overall comment"),
                                value: "{overall_comment}",
                                oninput: move |evt| overall_comment.set(evt.value()),
                            }
                            button {
                                class: "submit-btn",
                                disabled: !summary.can_submit || submitting(),
                                onclick: move |_| submit.call(()),
                                if submitting() && !submitted { {t("Submitting...")} } else { {t("Submit Audit")} }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }

            match submit_result() {
                Some(Ok(message)) => rsx! {
                    div { class: "notice success",
                        p { "{message}" }
                        Link { to: Route::Restaurants {}, {t("Back to restaurants")} }
                    }
                },
                Some(Err(message)) => rsx! {
                    p { class: "error", {t("Error")} ": {message}" }
                },
                None => rsx! {},
            }

            if let Some(vm) = chat_vm {
                ChatModal {
                    vm,
                    on_event: move |event| send.call(event),
                    on_close: move |()| close_chat.call(()),
                }
            }
        }
    }
}

#[component]
fn LocationBadge(status: LocationStatus) -> Element {
    let t = use_translator();
    let (icon, class, text) = match &status {
        LocationStatus::Checking => ("📍", "location checking", t("Validating location...")),
        LocationStatus::Verified => ("✓", "location success", t("Location Verified")),
        LocationStatus::Failed(_) => ("✗", "location error", t("Location Check Failed")),
        LocationStatus::Unavailable => ("?", "location unknown", t("Location unavailable")),
    };
    rsx! {
        div { class: "{class}",
            span { class: "status-icon", "{icon}" }
            span { " {text}" }
            if let LocationStatus::Failed(reason) = status {
                span { class: "notice", " ({reason})" }
            }
        }
    }
}

#[component]
fn SummaryPanel(summary: AuditSummaryVm) -> Element {
    let t = use_translator();
    rsx! {
        div { class: "summary",
            p { {t("Progress")} ": {summary.answered}/{summary.total} ({summary.completion}%)" }
            div { class: "progress-bar",
                div { class: "progress-fill", style: "width: {summary.completion}%" }
            }
            p { class: summary.score_class, {t("Score")} ": {summary.score}%" }
        }
    }
}

#[component]
fn CategoryCard(card: CategoryCardVm, enabled: bool, on_open: EventHandler<CategoryId>) -> Element {
    let id = card.id.clone();
    let class = if card.completed { "card category-tag completed" } else { "card category-tag" };
    rsx! {
        button {
            class: "{class}",
            disabled: !enabled,
            onclick: move |_| on_open.call(id.clone()),
            span { class: "icon", "{card.icon}" }
            span { " {card.name} " }
            span { class: "notice", "{card.progress_label()}" }
            if card.completed {
                span { class: "badge completed", " ✓" }
            }
        }
    }
}
