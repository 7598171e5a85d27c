//! Quark is a tiny in-memory file system for teaching block allocation, permissions and log integrity.
//! Nothing is persisted and nothing is ever freed: blocks and inodes are handed out monotonically.
//!
//! Quark's state, all owned by one `FileSystem`:
//! - Block Store: fixed array of 4 KiB blocks behind `BlockDevice`
//! - Inode Table: 12 direct pointers plus one single-indirect block per inode
//! - Directory: one flat, insertion-ordered table of hard entries and soft links
//! - Operation Log: ring buffer of checksummed operation records
//!
//! Quark's layers (from bottom to top):
//! 1. Block Device: block-granular storage, `MemDisk` by default.
//! 2. Allocator: monotonic ids and up-front capacity checks.
//! 3. Inode: file metadata and block mapping.
//! 4. File: XOR-scrambled reads and writes through the block map.
//! 5. Directory / Permissions / Journal: name resolution, access checks, operation records.
//! 6. FileSystem: the public interface.

mod config;
mod error;
mod block_dev;
mod superblock;
mod allocator;
mod structs;
mod inode;
mod file;
mod directory;
mod perm;
mod clock;
mod journal;
mod fs;

pub use block_dev::{BlockDevice, MemDisk};
pub use config::*;
pub use superblock::*;
pub use structs::*;
pub use inode::*;
pub use file::*;
pub use directory::*;
pub use perm::*;
pub use clock::*;
pub use journal::*;
pub use fs::*;
pub use allocator::{blocks_needed, data_blocks_for};
pub use error::FsError as Error;
pub use error::Result;
