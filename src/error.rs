// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error types.

use thiserror::Error;

/// Top-level error returned by fallible crate operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),
    #[error("Config Error: {0}")]
    Config(String),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Install(#[from] InstallError),
}

/// Malformed layout values supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The string is neither `auto` nor a number followed by `px` or `%`.
    #[error("Expected a valid number/string(px,%,auto), got \"{0}\"")]
    InvalidMeasurement(String),
}

/// Misuse of the plugin installer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstallError {
    /// Component props were given while the host renders its own component(s).
    #[error("component props cannot be combined with `customComponent` or `multipleComponents`")]
    PropsWithCustomComponent,
    /// The same plugin value was installed twice.
    #[error("plugin `{0}` is already installed")]
    AlreadyInstalled(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn parse_error_names_the_offending_input() {
        let err: Error = ParseError::InvalidMeasurement("5apx%".into()).into();
        assert_eq!(
            err.to_string(),
            "Expected a valid number/string(px,%,auto), got \"5apx%\""
        );
    }

    #[test]
    fn install_error_converts_into_top_level() {
        let err: Error = InstallError::AlreadyInstalled("notify".into()).into();
        assert!(matches!(err, Error::Install(InstallError::AlreadyInstalled(_))));
        assert!(err.to_string().contains("notify"));
    }
}
