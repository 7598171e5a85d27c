use std::fmt;

use crate::config::*;
use crate::directory::validate_name;
use crate::perm::Permissions;
use crate::Result;

/// Fixed-capacity tables a request can run out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Blocks,
    Inodes,
    DirEntries,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Blocks => write!(f, "block store"),
            Resource::Inodes => write!(f, "inode table"),
            Resource::DirEntries => write!(f, "directory"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inode {
    pub id: u32,
    pub size: u64,
    pub permissions: Permissions,
    pub links_cnt: u32,
    pub blocks: u32, // Data blocks mapped, the indirect block excluded
    pub direct_ptrs: [Option<u32>; NUM_DIRECT_PTRS],
    pub indirect_ptr: Option<u32>,
    pub owner_uid: u32,
    pub gid: Option<u32>, // None until the inode is populated
    pub timestamp: i64,
}

impl Inode {
    pub const fn empty(id: u32) -> Self {
        Self {
            id,
            size: 0,
            permissions: Permissions::NONE,
            links_cnt: 0,
            blocks: 0,
            direct_ptrs: [None; NUM_DIRECT_PTRS],
            indirect_ptr: None,
            owner_uid: 0,
            gid: None,
            timestamp: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// Hard entry: resolves straight to an inode.
    Hard { inode_id: u32 },
    /// Soft link: holds the name it points at, no inode.
    Soft { target: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn hard(name: &str, inode_id: u32) -> Result<Self> {
        validate_name(name)?;
        Ok(Self {
            name: name.to_string(),
            kind: EntryKind::Hard { inode_id },
        })
    }

    /// Soft links store both strings as given. The target is never resolved here.
    pub fn soft(name: &str, target: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: EntryKind::Soft {
                target: target.to_string(),
            },
        }
    }

    pub fn is_soft_link(&self) -> bool {
        matches!(self.kind, EntryKind::Soft { .. })
    }

    pub fn inode_id(&self) -> Option<u32> {
        match self.kind {
            EntryKind::Hard { inode_id } => Some(inode_id),
            EntryKind::Soft { .. } => None,
        }
    }
}
