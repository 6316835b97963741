use thiserror::Error;

use crate::traits::Capability;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("umci: Motor={:?} already exists.", .0)]
    DuplicateName(String),
    #[error("umci: No Driver={:?} is found.", .0)]
    DriverNotFound(String),
    #[error("umci: Driver={:?} implements no capability.", .0)]
    DriverInvalid(String),
    #[error(
        "umci: Capability mismatch: motor={:?} requires {} capability",
        motor,
        required
    )]
    CapabilityMismatch { motor: String, required: Capability },
    #[error("umci: Other: {:?}", .0)]
    Other(#[from] anyhow::Error),
}
