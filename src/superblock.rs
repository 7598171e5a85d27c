use crate::config::Config;

/// Capacities and allocation counters of a file system instance.
/// Counters only ever grow: nothing is freed in Quark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuperBlock {
    pub num_blocks: u32,  // Total number of blocks in the block store
    pub num_inodes: u32,  // Total number of inodes in the inode table
    pub num_dirents: u32, // Total number of directory slots

    pub block_count: u32, // Blocks handed out so far
    pub inode_count: u32, // Inodes handed out so far
    pub dir_count: u32,   // Directory slots used so far
}

impl SuperBlock {
    /// Builds a superblock from an already validated config.
    pub fn new(config: &Config) -> Self {
        Self {
            num_blocks: config.max_blocks as u32,
            num_inodes: config.max_inodes as u32,
            num_dirents: config.max_dir_entries as u32,
            block_count: 0,
            inode_count: 0,
            dir_count: 0,
        }
    }

    pub fn free_blocks(&self) -> u32 {
        self.num_blocks - self.block_count
    }

    pub fn free_inodes(&self) -> u32 {
        self.num_inodes - self.inode_count
    }

    pub fn free_dirents(&self) -> u32 {
        self.num_dirents - self.dir_count
    }
}
