use dioxus::prelude::*;
use dioxus_router::Router;
use tracing::warn;

use audit_core::model::Language;

use crate::context::{AppContext, Locale, WeekRefresh};
use crate::routes::Route;

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();
    let lang = use_signal(Language::default);
    let revision = use_signal(|| 0_u32);
    let locale = use_context_provider(|| Locale { lang, revision });
    let week_revision = use_signal(|| 0_u32);
    use_context_provider(|| WeekRefresh {
        revision: week_revision,
    });

    let language = ctx.language();
    use_future(move || {
        let language = language.clone();
        let mut lang = locale.lang;
        let mut revision = locale.revision;
        async move {
            match language.current().await {
                Ok(saved) => lang.set(saved),
                Err(err) => warn!(error = %err, "saved language unavailable"),
            }
            language.load().await;
            *revision.write() += 1;
        }
    });

    let current = locale.current();
    let dir = current.direction().as_attr();
    let code = current.code();

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        document::Title { "Restaurant Audit" }

        div { class: "app-root", dir: "{dir}", lang: "{code}",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
