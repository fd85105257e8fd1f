// Drilldown path synchronizer - Resolve the hierarchy levels a widget may drill into
use crate::application::hierarchy_repository::HierarchyRepository;
use crate::domain::attribute::{Attribute, DataSource};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSyncRequest {
    pub attribute: Attribute,
    pub data_source: DataSource,
    #[serde(default)]
    pub configured_paths: Vec<Attribute>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathSyncStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    /// The last fetch failed; the next sync retries
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PathSyncOutcome {
    /// Explicitly configured paths, no fetch made
    Configured(Vec<Attribute>),
    Resolved(Vec<Attribute>),
    /// Superseded by a later request; the result was discarded
    Stale,
    Failed,
}

/// Resolve drill paths once: configured paths win, otherwise the hierarchy
/// levels are fetched. Fetch failures degrade to no paths.
pub async fn sync_drilldown_paths(repository: &dyn HierarchyRepository, request: &PathSyncRequest) -> Vec<Attribute> {
    if !request.configured_paths.is_empty() {
        return request.configured_paths.clone();
    }

    match repository
        .fetch_hierarchy_levels(&request.attribute, &request.data_source)
        .await
    {
        Ok(levels) => levels,
        Err(e) => {
            tracing::warn!(
                "Failed to fetch hierarchy levels for {}: {:#}",
                request.attribute.expression,
                e
            );
            Vec::new()
        }
    }
}

/// Paths not yet part of the drill chain
pub fn get_available_drilldown_paths(all_paths: &[Attribute], selected: &[&Attribute]) -> Vec<Attribute> {
    all_paths
        .iter()
        .filter(|path| !selected.iter().any(|s| s.same_dimension(path)))
        .cloned()
        .collect()
}

#[derive(Debug, Default)]
struct SyncedPaths {
    status: PathSyncStatus,
    paths: Vec<Attribute>,
}

/// Keeps one widget's drill paths in sync with its current attribute.
///
/// Fetched levels are cached per (attribute, data source). Every sync takes a
/// request token; a response is applied only if its token is still the latest,
/// so a slow response never overwrites a newer one. The cache lives as long as
/// the synchronizer; hosts own one per widget and drop it with the widget, or
/// call `clear_cache` when the data source's hierarchies change.
pub struct DrilldownPathSynchronizer {
    repository: Arc<dyn HierarchyRepository>,
    cache: Mutex<HashMap<(String, String), Vec<Attribute>>>,
    latest_token: AtomicU64,
    current: Mutex<SyncedPaths>,
}

impl DrilldownPathSynchronizer {
    pub fn new(repository: Arc<dyn HierarchyRepository>) -> Self {
        Self {
            repository,
            cache: Mutex::new(HashMap::new()),
            latest_token: AtomicU64::new(0),
            current: Mutex::new(SyncedPaths::default()),
        }
    }

    pub fn status(&self) -> PathSyncStatus {
        self.lock_current().status
    }

    pub fn current_paths(&self) -> Vec<Attribute> {
        self.lock_current().paths.clone()
    }

    /// Forget fetched levels; the next sync of each attribute fetches again
    pub fn clear_cache(&self) {
        self.lock_cache().clear();
    }

    pub async fn sync(&self, request: &PathSyncRequest) -> PathSyncOutcome {
        let token = self.latest_token.fetch_add(1, Ordering::SeqCst) + 1;

        if !request.configured_paths.is_empty() {
            self.apply(token, PathSyncStatus::Ready, request.configured_paths.clone());
            return PathSyncOutcome::Configured(request.configured_paths.clone());
        }

        let key = (
            request.attribute.identity().to_string(),
            request.data_source.identity().to_string(),
        );
        let cached = self.lock_cache().get(&key).cloned();
        if let Some(paths) = cached {
            self.apply(token, PathSyncStatus::Ready, paths.clone());
            return PathSyncOutcome::Resolved(paths);
        }

        self.apply(token, PathSyncStatus::Loading, Vec::new());
        let result = self
            .repository
            .fetch_hierarchy_levels(&request.attribute, &request.data_source)
            .await;

        match result {
            Ok(paths) => {
                self.lock_cache().insert(key, paths.clone());
                if self.apply(token, PathSyncStatus::Ready, paths.clone()) {
                    PathSyncOutcome::Resolved(paths)
                } else {
                    tracing::debug!(
                        "Discarding stale hierarchy levels for {}",
                        request.attribute.expression
                    );
                    PathSyncOutcome::Stale
                }
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to sync drill paths for {}: {:#}",
                    request.attribute.expression,
                    e
                );
                if self.apply(token, PathSyncStatus::Failed, Vec::new()) {
                    PathSyncOutcome::Failed
                } else {
                    PathSyncOutcome::Stale
                }
            }
        }
    }

    /// Store a result if `token` is still the latest request
    fn apply(&self, token: u64, status: PathSyncStatus, paths: Vec<Attribute>) -> bool {
        let mut current = self.lock_current();
        if self.latest_token.load(Ordering::SeqCst) != token {
            return false;
        }
        current.status = status;
        current.paths = paths;
        true
    }

    fn lock_current(&self) -> std::sync::MutexGuard<'_, SyncedPaths> {
        self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, HashMap<(String, String), Vec<Attribute>>> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
