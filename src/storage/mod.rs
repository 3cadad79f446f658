//! Storage abstractions for per-reader data.
//!
//! ## Directory Structure
//!
//! ```text
//! {user_data_dir}/
//! └── user.json     # progress, last viewed module, recently viewed items
//! ```

pub mod local;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{ModuleProgress, ProgressMap};
use crate::services::RecentlyViewed;

// Re-export for convenience
pub use local::LocalStorage;

/// Everything remembered about one reader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    /// Progress per module ID
    #[serde(default)]
    pub progress: ProgressMap,

    /// Module the reader opened last
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_viewed_module: Option<String>,

    #[serde(default)]
    pub recently_viewed: RecentlyViewed,

    /// Last time the data was saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserData {
    /// Record a status; `Not Started` removes the entry.
    pub fn set_progress(&mut self, module_id: &str, status: ModuleProgress) {
        if status == ModuleProgress::NotStarted {
            self.progress.remove(module_id);
        } else {
            self.progress.insert(module_id.to_string(), status);
        }
        self.last_viewed_module = Some(module_id.to_string());
    }

    pub fn progress_of(&self, module_id: &str) -> ModuleProgress {
        self.progress.get(module_id).copied().unwrap_or_default()
    }
}

/// Trait for user-data storage backends.
#[async_trait]
pub trait UserDataStorage: Send + Sync {
    /// Load stored data, or defaults when nothing was saved yet.
    async fn load_user_data(&self) -> Result<UserData>;

    /// Persist the data, stamping `updated_at`.
    async fn save_user_data(&self, data: &UserData) -> Result<()>;
}
