use crate::inspection::domain::{ArtifactLocation, CanonicalIdentity, Ecosystem, ExtractionFailure};

/// Archive extensions recognised when none are configured, in match order
pub const DEFAULT_CONDA_EXTENSIONS: [&str; 2] = [".tar.bz2", ".conda"];

/// Filename pieces of a conda archive: `name-version-buildstring.ext`
#[derive(Debug, Clone, PartialEq, Eq)]
struct FileNamePieces<'a> {
    name: &'a str,
    version: &'a str,
    remainder: &'a str,
}

/// Extracts the identity of a conda archive from its filename and parent folder.
///
/// The version is `version-buildstring-architecture`, where the architecture is
/// the (trimmed) name of the folder holding the archive. `supported_extensions`
/// is tried in order; the first suffix match is stripped from the build string.
pub fn extract(
    location: &ArtifactLocation,
    supported_extensions: &[String],
) -> Result<CanonicalIdentity, ExtractionFailure> {
    let file_name = location.file_name().unwrap_or_default();
    let pieces = split_file_name(file_name).ok_or_else(|| ExtractionFailure::MalformedFilename {
        file_name: file_name.to_string(),
    })?;

    let build_string = supported_extensions
        .iter()
        .find_map(|extension| pieces.remainder.strip_suffix(extension.as_str()))
        .ok_or_else(|| ExtractionFailure::UnsupportedExtension {
            file_name: file_name.to_string(),
            supported: supported_extensions.to_vec(),
        })?;

    let architecture = location
        .parent_folder_name()
        .map(str::trim)
        .filter(|architecture| !architecture.is_empty())
        .ok_or_else(|| ExtractionFailure::MissingParent {
            path: location.to_string(),
        })?;

    let version = format!("{}-{}-{}", pieces.version.trim(), build_string, architecture);
    CanonicalIdentity::new(Ecosystem::Conda, pieces.name.trim(), version)
}

/// Splits on the last two dashes. The remainder may not contain dashes, pipes
/// or whitespace; name and version may not span lines. Every piece must hold
/// more than whitespace.
fn split_file_name(file_name: &str) -> Option<FileNamePieces<'_>> {
    if file_name.contains(is_line_terminator) {
        return None;
    }

    let (head, remainder) = file_name.rsplit_once('-')?;
    let (name, version) = head.rsplit_once('-')?;

    let remainder_valid = !remainder.contains(|c: char| c == '|' || c.is_whitespace());
    let blank = |piece: &str| piece.trim().is_empty();
    if blank(name) || blank(version) || remainder.is_empty() || !remainder_valid {
        return None;
    }

    Some(FileNamePieces {
        name,
        version,
        remainder,
    })
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}')
}
