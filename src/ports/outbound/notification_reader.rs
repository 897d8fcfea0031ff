use crate::inspection::domain::RawNotificationEvent;
use crate::shared::Result;
use std::path::Path;

/// NotificationReader port for loading a batch of notifications
///
/// The batch covers whatever time window the caller fetched; the reader does
/// not track windows itself.
pub trait NotificationReader {
    /// Reads the notification batch at `path`, preserving the producer's order
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist or cannot be read
    /// - The content is not a JSON array of notification events
    fn read_notifications(&self, path: &Path) -> Result<Vec<RawNotificationEvent>>;
}
