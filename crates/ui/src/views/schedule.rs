use dioxus::prelude::*;
use tracing::{info, warn};

use audit_core::model::RestaurantId;

use crate::context::{AppContext, WeekRefresh, use_translator};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{WeekVm, WeeklyVm, parse_date_input, visit_date_bounds};

#[derive(Clone, Debug, PartialEq)]
struct ScheduleData {
    mine: WeeklyVm,
    team: WeeklyVm,
}

#[component]
pub fn ScheduleView() -> Element {
    let ctx = use_context::<AppContext>();
    let t = use_translator();
    let week = use_context::<WeekRefresh>();
    let schedule = ctx.schedule();

    let resource = use_resource(move || {
        let schedule = schedule.clone();
        let _ = week.current();
        async move {
            match schedule.refresh_week_periods().await {
                Ok(Some(updates)) => info!(updates, "last week statuses processed"),
                Ok(None) => {}
                Err(err) => warn!(error = %err, "last week statuses not processed"),
            }
            let mine = schedule.my_weekly_visits().await.map_err(ViewError::from)?;
            let team = schedule
                .weekly_scheduled_audits()
                .await
                .map_err(ViewError::from)?;
            Ok::<_, ViewError>(ScheduleData {
                mine: WeeklyVm::from(&mine),
                team: WeeklyVm::from(&team),
            })
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page schedule",
            h2 { {t("Scheduled Visits")} }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { {t("Loading...")} }
                },
                ViewState::Ready(data) => rsx! {
                    if data.mine.next_week_reminder {
                        p { class: "notice reminder",
                            {t("You have not scheduled any visits for next week yet.")}
                        }
                    }
                    h3 { {t("My Visits")} }
                    WeekTable { week: data.mine.current }
                    WeekTable { week: data.mine.next }
                    h3 { {t("Team Schedule")} }
                    WeekTable { week: data.team.current }
                    WeekTable { week: data.team.next }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn WeekTable(week: WeekVm) -> Element {
    let t = use_translator();
    let summary = week.summary;
    rsx! {
        section { class: "week",
            h4 {
                {t(week.heading)}
                if let Some(range) = week.range.as_deref() {
                    span { class: "notice", " ({range})" }
                }
            }
            p {
                span { class: "stat", {t("Total")} ": {summary.total}" }
                span { class: "stat", {t("Completed")} ": {summary.completed}" }
                span { class: "stat", {t("Pending")} ": {summary.pending}" }
            }
            if week.rows.is_empty() {
                p { class: "notice", {t("No visits scheduled.")} }
            } else {
                table {
                    thead {
                        tr {
                            th { {t("Restaurant")} }
                            th { {t("Date")} }
                            th { {t("Status")} }
                        }
                    }
                    tbody {
                        for row in week.rows {
                            tr {
                                td { "{row.restaurant}" }
                                td { "{row.date}" }
                                td { span { class: row.status_class, {t(&row.status)} } }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Date picker that books a visit for one restaurant.
///
/// The form keeps its date after a failed booking and clears it after a
/// successful one.
#[component]
pub fn ScheduleVisitForm(
    restaurant: RestaurantId,
    restaurant_name: String,
    on_close: EventHandler<()>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let t = use_translator();
    let (min, max) = visit_date_bounds(ctx.clock().today());
    let schedule = ctx.schedule();

    let mut date = use_signal(String::new);
    let mut outcome = use_signal(|| None::<Result<String, String>>);
    let mut busy = use_signal(|| false);

    let submit = use_callback(move |()| {
        if busy() {
            return;
        }
        let Some(visit_date) = parse_date_input(&date()) else {
            outcome.set(Some(Err("Please select a visit date.".to_string())));
            return;
        };
        let schedule = schedule.clone();
        let restaurant = restaurant.clone();
        busy.set(true);
        spawn(async move {
            match schedule.schedule_visit(&restaurant, visit_date).await {
                Ok(message) => {
                    date.set(String::new());
                    outcome.set(Some(Ok(message)));
                }
                Err(err) => outcome.set(Some(Err(err.user_message()))),
            }
            busy.set(false);
        });
    });

    rsx! {
        form {
            class: "schedule-form",
            onsubmit: move |evt| {
                evt.prevent_default();
                submit.call(());
            },
            h3 { {t("Schedule Visit")} }
            p { "{restaurant_name}" }
            input {
                r#type: "date",
                min: "{min}",
                max: "{max}",
                value: "{date}",
                oninput: move |evt| date.set(evt.value()),
            }
            match outcome() {
                Some(Ok(message)) => rsx! { p { class: "notice success", "{message}" } },
                Some(Err(message)) => rsx! { p { class: "error", "{message}" } },
                None => rsx! {},
            }
            div { class: "modal-actions",
                button { r#type: "submit", disabled: busy(), {t("Schedule")} }
                button {
                    r#type: "button",
                    onclick: move |_| on_close.call(()),
                    {t("Close")}
                }
            }
        }
    }
}
