/// Filesystem adapters for JSON exports, composer mirrors and report output
mod file_reader;
mod file_writer;
mod mirror_manifest_locator;

pub use file_reader::FileSystemReader;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use mirror_manifest_locator::MirrorManifestLocator;
