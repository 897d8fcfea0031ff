/// Mock implementations for testing
mod mock_input_readers;
mod mock_progress_reporter;
mod mock_status_repository;

pub use mock_input_readers::{MockNotificationReader, MockProjectIndexReader};
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_status_repository::MockStatusRepository;
