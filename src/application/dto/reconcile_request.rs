use std::path::PathBuf;
use std::time::Duration;

/// ReconcileRequest - input of one reconciliation pass
#[derive(Debug, Clone)]
pub struct ReconcileRequest {
    /// JSON export of the notification batch
    pub notifications_path: PathBuf,
    /// JSON export of the project index
    pub index_path: PathBuf,
    /// Time budget of the pass, measured from its start
    pub deadline: Option<Duration>,
}

impl ReconcileRequest {
    pub fn new(notifications_path: PathBuf, index_path: PathBuf, deadline: Option<Duration>) -> Self {
        Self {
            notifications_path,
            index_path,
            deadline,
        }
    }
}
