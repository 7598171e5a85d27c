use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const BLOCK_SIZE: usize = 4096;
pub const MAX_BLOCKS: usize = 1024; // Default block store capacity
pub const MAX_INODES: usize = 128; // Default inode table capacity
pub const MAX_DIR_ENTRIES: usize = 128; // Default directory capacity
pub const MAX_LOGS: usize = 100; // Default operation log ring size

pub const MAX_FILE_NAME_LEN: usize = 255;
pub const PERMISSION_LEN: usize = 9; // "rwxrwxrwx"
pub const NUM_GROUPS: u32 = 10; // gid = uid % NUM_GROUPS

pub const NUM_DIRECT_PTRS: usize = 12; // Number of direct pointers in an inode
pub const PTR_SIZE: usize = 4; // Block ids are stored as little-endian u32
pub const PTRS_PER_BLOCK: usize = BLOCK_SIZE / PTR_SIZE; // Number of pointers in the indirect block
pub const MAX_FILE_BLOCKS: usize = NUM_DIRECT_PTRS + PTRS_PER_BLOCK;

// Upper bounds accepted by `Config::validate`; every table is allocated up front.
pub const MAX_CONFIG_BLOCKS: usize = 1 << 18; // 1 GiB of blocks
pub const MAX_CONFIG_ENTRIES: usize = 1 << 20; // Inodes, directory entries, log slots

pub const XOR_KEY: u8 = 0x55; // Applied to every stored byte
pub const MAX_SYMLINK_HOPS: usize = 8;

/// Runtime capacities of a file system instance.
/// Layout constants above stay fixed since the indirect block format depends on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub max_blocks: usize,
    pub max_inodes: usize,
    pub max_dir_entries: usize,
    pub max_logs: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_blocks: MAX_BLOCKS,
            max_inodes: MAX_INODES,
            max_dir_entries: MAX_DIR_ENTRIES,
            max_logs: MAX_LOGS,
        }
    }
}

impl Config {
    /// Parses a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("max_blocks", self.max_blocks, MAX_CONFIG_BLOCKS),
            ("max_inodes", self.max_inodes, MAX_CONFIG_ENTRIES),
            ("max_dir_entries", self.max_dir_entries, MAX_CONFIG_ENTRIES),
            ("max_logs", self.max_logs, MAX_CONFIG_ENTRIES),
        ];
        for (field, value, limit) in fields {
            if value == 0 {
                return Err(Error::InvalidConfig(format!("{} must be non-zero", field)));
            }
            if value > limit {
                return Err(Error::InvalidConfig(format!("{} exceeds {}", field, limit)));
            }
        }
        Ok(())
    }
}
