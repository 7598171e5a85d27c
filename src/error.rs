use thiserror::Error;

use crate::structs::Resource;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FsError {
    #[error("{0} capacity exceeded")]
    CapacityExceeded(Resource),

    #[error("no such file")]
    NotFound,

    #[error("permission denied")]
    PermissionDenied,

    #[error("invalid file name")]
    InvalidFileName,

    #[error("invalid permission string: {0:?}")]
    InvalidPermissions(String),

    #[error("file too large")]
    FileTooLarge,

    #[error("invalid block id: {0}")]
    InvalidBlockId(u32),

    #[error("invalid inode id: {0}")]
    InvalidInodeId(u32),

    #[error("not a symbolic link")]
    NotSymlink,

    #[error("too many levels of symbolic links")]
    SymlinkLoop,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for FsError {
    fn from(err: serde_json::Error) -> Self {
        FsError::InvalidConfig(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FsError>;
