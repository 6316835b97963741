use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("umci-apps: No Command is specified.")]
    NoCommand,
    #[error("umci-apps: Failed to parse {:?} as toml ({}).", .0, .1)]
    TomlParseFailure(PathBuf, #[source] toml::de::Error),
    #[error("umci-apps: No File {:?} is found ({}).", .0, .1)]
    NoFile(PathBuf, #[source] std::io::Error),
    #[error("umci-apps: No Motor={} is found.", .0)]
    NoMotor(String),
    #[error("umci-apps: Motor={} rejected {}.", .0, .1)]
    Rejected(String, String),
    #[error("umci-apps: Failed to parse command {:?} ({}).", .0, .1)]
    CommandParseFailure(String, String),
    #[error("umci-apps: umci: {:?}", .0)]
    Umci(#[from] umci::Error),
}
