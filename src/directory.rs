use crate::allocator::alloc_dirent_slot;
use crate::config::*;
use crate::error::{FsError, Result};
use crate::structs::*;
use crate::SuperBlock;

pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name.len() > MAX_FILE_NAME_LEN || name.contains('\0') {
        return Err(FsError::InvalidFileName);
    }
    Ok(())
}

/// Flat, insertion-ordered name table.
/// Names are not unique; lookups only ever see the first entry with a given name.
pub struct Directory {
    entries: Vec<DirEntry>,
}

impl Directory {
    pub fn new(num_dirents: u32) -> Self {
        Self {
            entries: Vec::with_capacity(num_dirents as usize),
        }
    }

    /// Query the first entry called `name`.
    pub fn lookup(&self, name: &str) -> Result<&DirEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .ok_or(FsError::NotFound)
    }

    /// Appends an entry.
    /// Would not touch links count of the target inode, which is caller's responsibility.
    pub fn add_entry(&mut self, superblock: &mut SuperBlock, entry: DirEntry) -> Result<()> {
        let slot = alloc_dirent_slot(superblock)?;
        tracing::debug!(slot, name = %entry.name, soft = entry.is_soft_link(), "added directory entry");
        self.entries.push(entry);
        Ok(())
    }

    pub fn entries(&self) -> &[DirEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
