use std::io;
use std::path::{Path, PathBuf};
use std::string::FromUtf8Error;

use thiserror::Error;

/// Why a locale file could not be loaded
///
/// Every variant collapses to the same outcome for callers of the loader: an
/// empty string table plus the attempted path.
#[derive(Error, Debug)]
pub enum LocaleError {
    #[error("locale file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to decode locale json: {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to read locale file: {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("unexpected error while loading locale file: {}: {source}", path.display())]
    InvalidEncoding {
        path: PathBuf,
        source: FromUtf8Error,
    },
}

impl LocaleError {
    /// Classify an I/O failure, splitting out a missing file
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        if source.kind() == io::ErrorKind::NotFound {
            LocaleError::NotFound { path }
        } else {
            LocaleError::Io { path, source }
        }
    }

    /// The locale file that was attempted
    pub fn path(&self) -> &Path {
        match self {
            LocaleError::NotFound { path }
            | LocaleError::Malformed { path, .. }
            | LocaleError::Io { path, .. }
            | LocaleError::InvalidEncoding { path, .. } => path,
        }
    }

    /// Stable label for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            LocaleError::NotFound { .. } => "not_found",
            LocaleError::Malformed { .. } => "malformed",
            LocaleError::Io { .. } => "io",
            LocaleError::InvalidEncoding { .. } => "unexpected",
        }
    }
}

/// Why placeholders could not be substituted into a template
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("no value for placeholder `{0}`")]
    MissingArgument(String),

    #[error("unsupported placeholder `{{{0}}}`")]
    UnsupportedField(String),

    #[error("format `{spec}` does not apply to `{name}`")]
    InvalidFormat { name: String, spec: String },

    #[error("unclosed `{{` at byte {0}")]
    UnclosedBrace(usize),

    #[error("single `}}` at byte {0}")]
    StrayClosingBrace(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_splits_not_found() {
        let path = Path::new("locales/en_us.json");
        let err = LocaleError::from_io(path, io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, LocaleError::NotFound { .. }));
        assert_eq!(err.kind(), "not_found");
        assert_eq!(err.path(), path);

        let err = LocaleError::from_io(path, io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, LocaleError::Io { .. }));
        assert_eq!(err.kind(), "io");
    }

    #[test]
    fn test_messages_name_the_path() {
        let err = LocaleError::NotFound {
            path: PathBuf::from("locales/ja_jp.json"),
        };
        assert_eq!(err.to_string(), "locale file not found: locales/ja_jp.json");
    }

    #[test]
    fn test_template_error_messages() {
        assert_eq!(
            TemplateError::UnsupportedField("0".into()).to_string(),
            "unsupported placeholder `{0}`"
        );
        assert_eq!(
            TemplateError::InvalidFormat {
                name: "count".into(),
                spec: ".2f".into(),
            }
            .to_string(),
            "format `.2f` does not apply to `count`"
        );
        assert_eq!(
            TemplateError::StrayClosingBrace(3).to_string(),
            "single `}` at byte 3"
        );
    }
}
