use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use audit_core::model::{Catalog, Language};
use storage::repository::PreferencesRepository;

use crate::error::{RpcError, ServiceError};
use crate::rpc::{Endpoint, RpcClient};

#[derive(Deserialize)]
struct TranslationsReply {
    #[serde(default)]
    message: HashMap<String, String>,
}

/// Interface language: the saved choice and the string catalogs.
#[derive(Clone)]
pub struct LanguageService {
    rpc: RpcClient,
    preferences: Arc<dyn PreferencesRepository>,
    catalog: Arc<RwLock<Catalog>>,
}

impl LanguageService {
    /// Starts with the built-in Arabic table until [`LanguageService::load`] runs.
    #[must_use]
    pub fn new(rpc: RpcClient, preferences: Arc<dyn PreferencesRepository>) -> Self {
        Self {
            rpc,
            preferences,
            catalog: Arc::new(RwLock::new(Catalog::basic())),
        }
    }

    /// Fetch the server catalogs.
    ///
    /// A failed Arabic fetch keeps the built-in table; a failed English fetch
    /// leaves English untranslated.
    pub async fn load(&self) {
        let mut catalog = Catalog::basic();
        match self.fetch(Language::Ar).await {
            Ok(table) => catalog.insert_table(Language::Ar, table),
            Err(err) => warn!(error = %err, "using built-in arabic strings"),
        }
        match self.fetch(Language::En).await {
            Ok(table) => catalog.insert_table(Language::En, table),
            Err(err) => debug!(error = %err, "no english catalog"),
        }
        *self
            .catalog
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = catalog;
    }

    /// Saved language, English when none was chosen.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Storage` if preferences cannot be read.
    pub async fn current(&self) -> Result<Language, ServiceError> {
        Ok(self.preferences.language().await?.unwrap_or_default())
    }

    /// Persist `lang` and tell the backend about it.
    ///
    /// The backend call is best effort; only a local storage failure is an error.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Storage` if the choice cannot be saved.
    pub async fn switch(&self, lang: Language) -> Result<(), ServiceError> {
        self.preferences.set_language(lang).await?;
        let reply: Result<serde_json::Value, RpcError> = self
            .rpc
            .invoke(Endpoint::SET_USER_LANGUAGE, &json!({ "language": lang.code() }))
            .await;
        if let Err(err) = reply {
            warn!(language = %lang, error = %err, "backend language not updated");
        }
        Ok(())
    }

    #[must_use]
    pub fn translate(&self, lang: Language, key: &str) -> String {
        self.catalog
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .translate(lang, key)
            .to_string()
    }

    /// Snapshot of the loaded catalogs.
    #[must_use]
    pub fn catalog(&self) -> Catalog {
        self.catalog
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    async fn fetch(&self, lang: Language) -> Result<HashMap<String, String>, RpcError> {
        let reply: TranslationsReply = self
            .rpc
            .invoke(Endpoint::GET_TRANSLATIONS, &json!({ "lang": lang.code() }))
            .await?;
        Ok(reply.message)
    }
}
