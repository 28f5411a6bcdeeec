pub mod init;
pub mod navigate;
pub mod results;
pub mod share;
pub mod status;

use selfassess_core::session::SurveySession;
use selfassess_core::storage::JsonFileStore;

use crate::config::SelfassessConfig;

/// Open the saved survey described by `config`. Unreadable progress is
/// logged and replaced by a fresh survey.
pub fn open_session(config: &SelfassessConfig) -> SurveySession<JsonFileStore> {
    let store = JsonFileStore::new(config.state_dir.clone());
    SurveySession::open(store, config.storage_key.as_str())
}

/// Tell the user when progress could not be saved.
pub fn warn_unsaved(persisted: bool) {
    if !persisted {
        eprintln!("Warning: progress could not be saved; it will be lost when this command exits.");
    }
}
