use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use wiremock::MockServer;

use audit_core::model::{FollowUpTask, Language, QuestionId};
use audit_core::time::fixed_clock;
use services::rpc::{RpcClient, RpcConfig};
use services::{
    AppServices, ChecklistService, Clock, Coordinates, DailyAuditService, LanguageService,
    RestaurantService, ScheduleService,
};
use storage::repository::ClientStorage;

use crate::context::{Locale, UiApp, WeekRefresh, build_app_context};
use crate::views::chat::FollowUpInput;
use crate::views::{
    AuditView, DailyAuditSessionView, DailyAuditsView, RestaurantsView, ScheduleView,
};

#[derive(Clone)]
struct TestApp {
    services: AppServices,
    position: Option<Coordinates>,
}

impl UiApp for TestApp {
    fn clock(&self) -> Clock {
        self.services.clock()
    }

    fn position(&self) -> Option<Coordinates> {
        self.position
    }

    fn checklists(&self) -> Arc<ChecklistService> {
        self.services.checklists()
    }

    fn restaurants(&self) -> Arc<RestaurantService> {
        self.services.restaurants()
    }

    fn schedule(&self) -> Arc<ScheduleService> {
        self.services.schedule()
    }

    fn daily_audits(&self) -> Arc<DailyAuditService> {
        self.services.daily_audits()
    }

    fn language(&self) -> Arc<LanguageService> {
        self.services.language()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Restaurants,
    Audit,
    Schedule,
    DailyAudits,
    DailyAuditSession,
    PhotoFollowUp,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    lang: Language,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    let lang = use_signal(|| props.lang);
    let revision = use_signal(|| 0_u32);
    use_context_provider(|| Locale { lang, revision });
    let week_revision = use_signal(|| 0_u32);
    use_context_provider(|| WeekRefresh {
        revision: week_revision,
    });
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Restaurants => rsx! { RestaurantsView {} },
        ViewKind::Audit => rsx! { AuditView {} },
        ViewKind::Schedule => rsx! { ScheduleView {} },
        ViewKind::DailyAudits => rsx! { DailyAuditsView {} },
        ViewKind::DailyAuditSession => rsx! { DailyAuditSessionView {} },
        ViewKind::PhotoFollowUp => rsx! {
            FollowUpInput {
                task: FollowUpTask::image(QuestionId::new("q-fridge")),
                on_event: move |_| {},
            }
        },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub services: AppServices,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    /// Drive the dom until `needle` shows up or the attempts run out.
    pub async fn render_when(&mut self, needle: &str) -> String {
        for _ in 0..60 {
            let html = self.render();
            if html.contains(needle) {
                return html;
            }
            self.drive_async().await;
        }
        self.render()
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub struct HarnessOptions {
    pub lang: Language,
    pub position: Option<Coordinates>,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self {
            lang: Language::En,
            position: None,
        }
    }
}

pub fn app_services(server: &MockServer) -> AppServices {
    let config = RpcConfig::parse(&server.uri())
        .expect("mock server url")
        .with_timeout_secs(5);
    let rpc = RpcClient::new(config).expect("rpc client");
    AppServices::new(fixed_clock(), rpc, ClientStorage::in_memory())
}

pub fn setup_view_harness(view: ViewKind, server: &MockServer) -> ViewHarness {
    setup_view_harness_with(view, app_services(server), HarnessOptions::default())
}

pub fn setup_view_harness_with(
    view: ViewKind,
    services: AppServices,
    options: HarnessOptions,
) -> ViewHarness {
    let app = Arc::new(TestApp {
        services: services.clone(),
        position: options.position,
    });
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            lang: options.lang,
        },
    );
    ViewHarness { dom, services }
}
