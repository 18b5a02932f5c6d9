use async_trait::async_trait;
use audit_core::model::{DailyAuditSession, Language, Restaurant};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Keys of the persistent preference store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    Language,
    LastWeekRefresh,
}

impl PreferenceKey {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Language => "app_language",
            Self::LastWeekRefresh => "last_week_refresh",
        }
    }
}

/// State scoped to one run of the client: the restaurant being audited and
/// the payload of a daily audit in progress.
#[async_trait]
pub trait SessionStateRepository: Send + Sync {
    /// Remember the restaurant chosen on the list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn set_selected_restaurant(&self, restaurant: &Restaurant) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the stored value cannot be read.
    async fn selected_restaurant(&self) -> Result<Option<Restaurant>, StorageError>;

    /// Keep the payload returned when a daily audit starts.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn set_daily_audit(&self, session: &DailyAuditSession) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the stored value cannot be read.
    async fn daily_audit(&self) -> Result<Option<DailyAuditSession>, StorageError>;

    /// Forget everything, as on logout.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be cleared.
    async fn clear(&self) -> Result<(), StorageError>;
}

/// Preferences that survive restarts.
#[async_trait]
pub trait PreferencesRepository: Send + Sync {
    /// Fetch the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get(&self, key: PreferenceKey) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn set(&self, key: PreferenceKey, value: &str) -> Result<(), StorageError>;

    /// Remove every preference.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn clear(&self) -> Result<(), StorageError>;

    /// Saved interface language. Unknown codes read as unset.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn language(&self) -> Result<Option<Language>, StorageError> {
        Ok(self
            .get(PreferenceKey::Language)
            .await?
            .and_then(|raw| raw.parse().ok()))
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn set_language(&self, lang: Language) -> Result<(), StorageError> {
        self.set(PreferenceKey::Language, lang.code()).await
    }

    /// When the weekly views were last refreshed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the stored timestamp is not RFC 3339.
    async fn last_week_refresh(&self) -> Result<Option<DateTime<Utc>>, StorageError> {
        let Some(raw) = self.get(PreferenceKey::LastWeekRefresh).await? else {
            return Ok(None);
        };
        DateTime::parse_from_rfc3339(&raw)
            .map(|at| Some(at.with_timezone(&Utc)))
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn set_last_week_refresh(&self, at: DateTime<Utc>) -> Result<(), StorageError> {
        self.set(PreferenceKey::LastWeekRefresh, &at.to_rfc3339())
            .await
    }
}

/// Simple in-memory repository implementation for the session scope and tests.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    selected: Arc<Mutex<Option<Restaurant>>>,
    daily: Arc<Mutex<Option<DailyAuditSession>>>,
    preferences: Arc<Mutex<HashMap<PreferenceKey, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(err: std::sync::PoisonError<T>) -> StorageError {
    StorageError::Connection(err.to_string())
}

#[async_trait]
impl SessionStateRepository for InMemoryRepository {
    async fn set_selected_restaurant(&self, restaurant: &Restaurant) -> Result<(), StorageError> {
        let mut guard = self.selected.lock().map_err(poisoned)?;
        *guard = Some(restaurant.clone());
        Ok(())
    }

    async fn selected_restaurant(&self) -> Result<Option<Restaurant>, StorageError> {
        let guard = self.selected.lock().map_err(poisoned)?;
        Ok(guard.clone())
    }

    async fn set_daily_audit(&self, session: &DailyAuditSession) -> Result<(), StorageError> {
        let mut guard = self.daily.lock().map_err(poisoned)?;
        *guard = Some(session.clone());
        Ok(())
    }

    async fn daily_audit(&self) -> Result<Option<DailyAuditSession>, StorageError> {
        let guard = self.daily.lock().map_err(poisoned)?;
        Ok(guard.clone())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        *self.selected.lock().map_err(poisoned)? = None;
        *self.daily.lock().map_err(poisoned)? = None;
        Ok(())
    }
}

#[async_trait]
impl PreferencesRepository for InMemoryRepository {
    async fn get(&self, key: PreferenceKey) -> Result<Option<String>, StorageError> {
        let guard = self.preferences.lock().map_err(poisoned)?;
        Ok(guard.get(&key).cloned())
    }

    async fn set(&self, key: PreferenceKey, value: &str) -> Result<(), StorageError> {
        let mut guard = self.preferences.lock().map_err(poisoned)?;
        guard.insert(key, value.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.preferences.lock().map_err(poisoned)?.clear();
        Ok(())
    }
}

/// Aggregates the session and preference stores behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct ClientStorage {
    pub session: Arc<dyn SessionStateRepository>,
    pub preferences: Arc<dyn PreferencesRepository>,
}

impl ClientStorage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let session: Arc<dyn SessionStateRepository> = Arc::new(repo.clone());
        let preferences: Arc<dyn PreferencesRepository> = Arc::new(repo);
        Self {
            session,
            preferences,
        }
    }

    /// Drop session state and preferences together, as on logout.
    ///
    /// # Errors
    ///
    /// Returns the first `StorageError` raised by either store.
    pub async fn clear_all(&self) -> Result<(), StorageError> {
        self.session.clear().await?;
        self.preferences.clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use audit_core::time::fixed_now;

    fn restaurant() -> Restaurant {
        serde_json::from_value(serde_json::json!({
            "name": "REST-1",
            "restaurant_name": "Harbour Grill",
            "can_access": 1
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn session_state_round_trips_and_clears() {
        let repo = InMemoryRepository::new();
        repo.set_selected_restaurant(&restaurant()).await.unwrap();
        let stored = repo.selected_restaurant().await.unwrap().unwrap();
        assert_eq!(stored.id.as_str(), "REST-1");

        SessionStateRepository::clear(&repo).await.unwrap();
        assert!(repo.selected_restaurant().await.unwrap().is_none());
        assert!(repo.daily_audit().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn preferences_store_language_and_refresh() {
        let repo = InMemoryRepository::new();
        assert!(repo.language().await.unwrap().is_none());

        repo.set_language(Language::Ar).await.unwrap();
        repo.set_last_week_refresh(fixed_now()).await.unwrap();
        assert_eq!(repo.language().await.unwrap(), Some(Language::Ar));
        assert_eq!(repo.last_week_refresh().await.unwrap(), Some(fixed_now()));
    }

    #[tokio::test]
    async fn unknown_language_code_reads_as_unset() {
        let repo = InMemoryRepository::new();
        repo.set(PreferenceKey::Language, "fr").await.unwrap();
        assert!(repo.language().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn garbage_timestamp_is_a_serialization_error() {
        let repo = InMemoryRepository::new();
        repo.set(PreferenceKey::LastWeekRefresh, "yesterday")
            .await
            .unwrap();
        assert!(matches!(
            repo.last_week_refresh().await,
            Err(StorageError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn clear_all_wipes_both_scopes() {
        let storage = ClientStorage::in_memory();
        storage
            .session
            .set_selected_restaurant(&restaurant())
            .await
            .unwrap();
        storage.preferences.set_language(Language::Ar).await.unwrap();

        storage.clear_all().await.unwrap();
        assert!(storage.session.selected_restaurant().await.unwrap().is_none());
        assert!(storage.preferences.language().await.unwrap().is_none());
    }
}
