mod detect;
mod git;
mod io;
mod store;

pub use detect::DetectError;
pub use git::GitError;
pub use io::IoError;
pub use store::StoreError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Detect(#[from] DetectError),
}

pub type Result<T> = std::result::Result<T, Error>;
