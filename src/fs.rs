use std::io::{self, Write};

use crate::allocator::{blocks_needed, data_blocks_for, reserve};
use crate::config::*;
use crate::directory::{validate_name, Directory};
use crate::error::{FsError, Result};
use crate::file::{fread, fwrite};
use crate::inode::InodeTable;
use crate::journal::{Journal, LogStatus};
use crate::perm::{check_access, group_of, Access, Permissions};
use crate::structs::*;
use crate::{BlockDevice, Clock, MemDisk, SuperBlock, SystemClock};

/// The whole file system state: block store, inode table, directory and operation log.
/// Methods take `&mut self`; wrap the instance in a lock to share it between threads.
pub struct FileSystem<D: BlockDevice = MemDisk> {
    device: D,
    superblock: SuperBlock,
    inodes: InodeTable,
    directory: Directory,
    journal: Journal,
    clock: Box<dyn Clock>,
}

impl FileSystem<MemDisk> {
    /// An empty file system with the default capacities.
    pub fn init() -> Self {
        let config = Config::default();
        Self::build(MemDisk::new(config.max_blocks), &config, Box::new(SystemClock))
    }

    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(MemDisk::new(config.max_blocks), &config, Box::new(SystemClock)))
    }
}

impl<D: BlockDevice> FileSystem<D> {
    pub fn format(device: D, config: Config, clock: Box<dyn Clock>) -> Result<Self> {
        config.validate()?;
        if device.num_blocks() < config.max_blocks {
            return Err(FsError::InvalidConfig(format!(
                "device holds {} blocks, {} configured",
                device.num_blocks(),
                config.max_blocks
            )));
        }
        Ok(Self::build(device, &config, clock))
    }

    fn build(device: D, config: &Config, clock: Box<dyn Clock>) -> Self {
        let superblock = SuperBlock::new(config);
        Self {
            device,
            inodes: InodeTable::new(superblock.num_inodes),
            directory: Directory::new(superblock.num_dirents),
            journal: Journal::new(config.max_logs),
            superblock,
            clock,
        }
    }

    fn record(&mut self, operation: String) {
        let timestamp = self.clock.now();
        self.journal.append(operation, timestamp);
    }

    /// Creates a regular file holding `data` and returns its inode id.
    /// Capacity for the inode, every block and the directory entry is checked before anything
    /// is allocated, so a failed call leaves the file system untouched.
    pub fn create_file(&mut self, name: &str, permissions: &str, uid: u32, data: &[u8]) -> Result<u32> {
        validate_name(name)?;
        let permissions: Permissions = permissions.parse()?;
        let data_blocks = data_blocks_for(data.len() as u64);
        if data_blocks > MAX_FILE_BLOCKS {
            return Err(FsError::FileTooLarge);
        }
        reserve(&self.superblock, 1, blocks_needed(data_blocks), 1)?;

        let timestamp = self.clock.now();
        let inode = self.inodes.alloc(&mut self.superblock)?;
        inode.permissions = permissions;
        inode.links_cnt = 1;
        inode.owner_uid = uid;
        inode.gid = Some(group_of(uid));
        inode.timestamp = timestamp;
        fwrite(&mut self.device, &mut self.superblock, inode, data)?;
        let inode_id = inode.id;

        self.directory
            .add_entry(&mut self.superblock, DirEntry::hard(name, inode_id)?)?;
        self.record(format!("Created file {} by UID {}", name, uid));
        tracing::info!(name, inode = inode_id, uid, size = data.len(), "created file");

        Ok(inode_id)
    }

    /// Reads a file into `buffer`, copying at most `buffer.len() - 1` bytes followed by a 0 byte.
    /// Returns the file's full size, which may exceed what fit in the buffer.
    /// Soft links are not followed; see `read_file_follow`.
    pub fn read_file(&mut self, name: &str, uid: u32, buffer: &mut [u8]) -> Result<u64> {
        let inode_id = self.directory.lookup(name)?.inode_id().ok_or(FsError::NotFound)?;
        self.read_inode(name, inode_id, uid, buffer)
    }

    /// Like `read_file`, but dereferences soft links by name first.
    pub fn read_file_follow(&mut self, name: &str, uid: u32, buffer: &mut [u8]) -> Result<u64> {
        let inode_id = self.resolve_follow(name)?;
        self.read_inode(name, inode_id, uid, buffer)
    }

    fn read_inode(&mut self, name: &str, inode_id: u32, uid: u32, buffer: &mut [u8]) -> Result<u64> {
        let inode = self.inodes.get(&self.superblock, inode_id)?;
        check_access(inode, uid, Access::Read)?;

        let limit = buffer.len().saturating_sub(1);
        let copied = fread(&self.device, inode, 0, &mut buffer[..limit])?;
        if let Some(terminator) = buffer.get_mut(copied) {
            *terminator = 0;
        }
        let size = inode.size;

        self.record(format!("Read file {} by UID {}", name, uid));
        tracing::debug!(name, inode = inode_id, uid, size, copied, "read file");
        Ok(size)
    }

    fn resolve_follow(&self, name: &str) -> Result<u32> {
        let mut current = name;
        for _ in 0..=MAX_SYMLINK_HOPS {
            match &self.directory.lookup(current)?.kind {
                EntryKind::Hard { inode_id } => return Ok(*inode_id),
                EntryKind::Soft { target } => current = target.as_str(),
            }
        }
        Err(FsError::SymlinkLoop)
    }

    /// Adds `new_name` as a second name for the inode behind `existing_name`.
    /// Needs write access to that inode.
    pub fn create_hard_link(&mut self, existing_name: &str, new_name: &str, uid: u32) -> Result<()> {
        let inode_id = self
            .directory
            .lookup(existing_name)?
            .inode_id()
            .ok_or(FsError::NotFound)?;
        check_access(self.inodes.get(&self.superblock, inode_id)?, uid, Access::Write)?;

        self.directory
            .add_entry(&mut self.superblock, DirEntry::hard(new_name, inode_id)?)?;
        let inode = self.inodes.get_mut(&self.superblock, inode_id)?;
        inode.links_cnt += 1;
        let links_cnt = inode.links_cnt;

        self.record(format!(
            "Created hard link {} to {} by UID {}",
            new_name, existing_name, uid
        ));
        tracing::info!(existing_name, new_name, inode = inode_id, links_cnt, "created hard link");
        Ok(())
    }

    /// Adds `new_name` pointing at the name `existing_name`.
    /// The target is neither checked for existence nor for permissions.
    pub fn create_soft_link(&mut self, existing_name: &str, new_name: &str, uid: u32) -> Result<()> {
        self.directory
            .add_entry(&mut self.superblock, DirEntry::soft(new_name, existing_name))?;
        self.record(format!(
            "Created soft link {} to {} by UID {}",
            new_name, existing_name, uid
        ));
        tracing::info!(existing_name, new_name, "created soft link");
        Ok(())
    }

    pub fn read_link(&self, name: &str) -> Result<&str> {
        match &self.directory.lookup(name)?.kind {
            EntryKind::Soft { target } => Ok(target.as_str()),
            EntryKind::Hard { .. } => Err(FsError::NotSymlink),
        }
    }

    pub fn stat(&self, name: &str) -> Result<&Inode> {
        let inode_id = self.directory.lookup(name)?.inode_id().ok_or(FsError::NotFound)?;
        self.inodes.get(&self.superblock, inode_id)
    }

    pub fn inode(&self, inode_id: u32) -> Result<&Inode> {
        self.inodes.get(&self.superblock, inode_id)
    }

    pub fn entries(&self) -> &[DirEntry] {
        self.directory.entries()
    }

    pub fn print_logs(&self, out: &mut impl Write) -> io::Result<()> {
        self.journal.print(out)
    }

    pub fn verify_logs(&self, out: &mut impl Write) -> io::Result<Vec<LogStatus>> {
        self.journal.print_verification(out)
    }

    pub fn log_count(&self) -> u64 {
        self.journal.log_count()
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn journal_mut(&mut self) -> &mut Journal {
        &mut self.journal
    }

    pub fn superblock(&self) -> &SuperBlock {
        &self.superblock
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn dump(&self) -> String {
        let sb = &self.superblock;
        format!(
            "blocks {}/{}, inodes {}/{}, dirents {}/{}, logs {} (ring {})",
            sb.block_count,
            sb.num_blocks,
            sb.inode_count,
            sb.num_inodes,
            sb.dir_count,
            sb.num_dirents,
            self.journal.log_count(),
            self.journal.capacity()
        )
    }
}
