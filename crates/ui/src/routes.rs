use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};
use services::WEEK_REFRESH_INTERVAL;
use tracing::{info, warn};

use audit_core::model::Language;

use crate::context::{AppContext, Locale, WeekRefresh, use_translator};
use crate::views::{
    AuditView, DailyAuditSessionView, DailyAuditsView, RestaurantsView, ScheduleView,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", RestaurantsView)] Restaurants {},
        #[route("/audit", AuditView)] Audit {},
        #[route("/schedule", ScheduleView)] Schedule {},
        #[route("/daily", DailyAuditsView)] DailyAudits {},
        #[route("/daily/current", DailyAuditSessionView)] DailyAuditSession {},
}

#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();
    let week = use_context::<WeekRefresh>();
    let schedule = ctx.schedule();

    use_future(move || {
        let schedule = schedule.clone();
        let mut week = week;
        async move {
            loop {
                match schedule.refresh_week_periods().await {
                    Ok(Some(updates)) => {
                        info!(updates, "week periods refreshed");
                        week.bump();
                    }
                    Ok(None) => {}
                    Err(err) => warn!(error = %err, "week periods not refreshed"),
                }
                tokio::time::sleep(WEEK_REFRESH_INTERVAL).await;
            }
        }
    });

    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let t = use_translator();
    let restaurants = ctx.restaurants();

    let logout = use_callback(move |()| {
        let restaurants = restaurants.clone();
        spawn(async move {
            if let Err(err) = restaurants.logout().await {
                warn!(error = %err, "client state not cleared");
            }
            let _ = navigator.push(Route::Restaurants {});
        });
    });

    rsx! {
        nav { class: "sidebar",
            h1 { {t("Restaurant Audit")} }
            ul {
                li { Link { to: Route::Restaurants {}, {t("Restaurants")} } }
                li { Link { to: Route::Schedule {}, {t("Schedule")} } }
                li { Link { to: Route::DailyAudits {}, {t("Daily Audits")} } }
            }
            LanguageSwitcher {}
            button { class: "logout", onclick: move |_| logout.call(()), {t("Logout")} }
        }
    }
}

#[component]
pub fn LanguageSwitcher() -> Element {
    let ctx = use_context::<AppContext>();
    let locale = use_context::<Locale>();
    let active = locale.current();

    let switch = use_callback(move |lang: Language| {
        let language = ctx.language();
        let mut current = locale.lang;
        spawn(async move {
            if let Err(err) = language.switch(lang).await {
                warn!(language = %lang, error = %err, "language choice not saved");
            }
            current.set(lang);
        });
    });

    rsx! {
        div { class: "language-switcher",
            for lang in Language::ALL {
                button {
                    class: if lang == active { "lang-btn active" } else { "lang-btn" },
                    "data-lang": lang.code(),
                    onclick: move |_| switch.call(lang),
                    "{lang.native_name()}"
                }
            }
        }
    }
}
