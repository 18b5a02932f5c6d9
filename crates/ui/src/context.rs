use std::sync::Arc;

use dioxus::prelude::*;

use audit_core::model::Language;
use services::{
    ChecklistService, Clock, Coordinates, DailyAuditService, LanguageService, RestaurantService,
    ScheduleService,
};

pub trait UiApp: Send + Sync {
    fn clock(&self) -> Clock;
    /// Device position used for the location check, when the host knows it.
    fn position(&self) -> Option<Coordinates>;

    fn checklists(&self) -> Arc<ChecklistService>;
    fn restaurants(&self) -> Arc<RestaurantService>;
    fn schedule(&self) -> Arc<ScheduleService>;
    fn daily_audits(&self) -> Arc<DailyAuditService>;
    fn language(&self) -> Arc<LanguageService>;
}

#[derive(Clone)]
pub struct AppContext {
    clock: Clock,
    position: Option<Coordinates>,

    checklists: Arc<ChecklistService>,
    restaurants: Arc<RestaurantService>,
    schedule: Arc<ScheduleService>,
    daily_audits: Arc<DailyAuditService>,
    language: Arc<LanguageService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            clock: app.clock(),
            position: app.position(),
            checklists: app.checklists(),
            restaurants: app.restaurants(),
            schedule: app.schedule(),
            daily_audits: app.daily_audits(),
            language: app.language(),
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn position(&self) -> Option<Coordinates> {
        self.position
    }

    #[must_use]
    pub fn checklists(&self) -> Arc<ChecklistService> {
        Arc::clone(&self.checklists)
    }

    #[must_use]
    pub fn restaurants(&self) -> Arc<RestaurantService> {
        Arc::clone(&self.restaurants)
    }

    #[must_use]
    pub fn schedule(&self) -> Arc<ScheduleService> {
        Arc::clone(&self.schedule)
    }

    #[must_use]
    pub fn daily_audits(&self) -> Arc<DailyAuditService> {
        Arc::clone(&self.daily_audits)
    }

    #[must_use]
    pub fn language(&self) -> Arc<LanguageService> {
        Arc::clone(&self.language)
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

/// Active interface language, shared by every view below the app root.
#[derive(Clone, Copy)]
pub struct Locale {
    pub lang: Signal<Language>,
    /// Bumped once the server catalogs are loaded so labels re-render.
    pub revision: Signal<u32>,
}

impl Locale {
    #[must_use]
    pub fn current(&self) -> Language {
        (self.lang)()
    }
}

/// Bumped when the week periods roll over so restaurant and visit lists reload.
#[derive(Clone, Copy)]
pub struct WeekRefresh {
    pub revision: Signal<u32>,
}

impl WeekRefresh {
    /// Read the revision, subscribing the caller to future bumps.
    #[must_use]
    pub fn current(&self) -> u32 {
        (self.revision)()
    }

    pub fn bump(&mut self) {
        *self.revision.write() += 1;
    }
}

/// Translator bound to the current language.
///
/// Reading the locale signals subscribes the calling component, so labels
/// follow a language switch without a reload.
#[must_use]
pub fn use_translator() -> impl Fn(&str) -> String + Clone + 'static {
    let ctx = use_context::<AppContext>();
    let locale = use_context::<Locale>();
    let language = ctx.language();
    let lang = locale.current();
    let _ = (locale.revision)();
    move |key: &str| language.translate(lang, key)
}
