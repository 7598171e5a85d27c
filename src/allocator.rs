//! Monotonic allocation of blocks, inodes and directory slots.
//! Ids are handed out in order and never reclaimed, so the superblock counters are the whole allocator state.

use crate::config::*;
use crate::error::FsError;
use crate::{BlockDevice, Resource, Result, SuperBlock};

/// Number of data blocks holding `size` bytes.
pub fn data_blocks_for(size: u64) -> usize {
    size.div_ceil(BLOCK_SIZE as u64) as usize
}

/// Blocks a file of `data_blocks` data blocks occupies, indirect block included.
pub fn blocks_needed(data_blocks: usize) -> usize {
    if data_blocks > NUM_DIRECT_PTRS {
        data_blocks + 1
    } else {
        data_blocks
    }
}

/// Checks up front that a whole operation fits, so nothing is allocated when it does not.
pub fn reserve(
    superblock: &SuperBlock,
    inodes: u32,
    blocks: usize,
    dirents: u32,
) -> Result<()> {
    if inodes > superblock.free_inodes() {
        return Err(FsError::CapacityExceeded(Resource::Inodes));
    }
    if blocks > superblock.free_blocks() as usize {
        return Err(FsError::CapacityExceeded(Resource::Blocks));
    }
    if dirents > superblock.free_dirents() {
        return Err(FsError::CapacityExceeded(Resource::DirEntries));
    }
    Ok(())
}

/// Allocates the next data block and zeroes it.
pub fn alloc_data_block(
    device: &mut impl BlockDevice,
    superblock: &mut SuperBlock,
) -> Result<u32> {
    if superblock.block_count >= superblock.num_blocks {
        return Err(FsError::CapacityExceeded(Resource::Blocks));
    }
    let block_id = superblock.block_count;
    superblock.block_count += 1;

    device.write_block(block_id, &[0u8; BLOCK_SIZE])?;
    tracing::debug!(block_id, used = superblock.block_count, "allocated block");

    Ok(block_id)
}

/// Allocates the next inode id.
/// Only called by InodeTable::alloc.
pub(crate) fn alloc_inode_id(superblock: &mut SuperBlock) -> Result<u32> {
    if superblock.inode_count >= superblock.num_inodes {
        return Err(FsError::CapacityExceeded(Resource::Inodes));
    }
    let inode_id = superblock.inode_count;
    superblock.inode_count += 1;
    Ok(inode_id)
}

/// Claims the next directory slot.
/// Only called by Directory::add_entry.
pub(crate) fn alloc_dirent_slot(superblock: &mut SuperBlock) -> Result<u32> {
    if superblock.dir_count >= superblock.num_dirents {
        return Err(FsError::CapacityExceeded(Resource::DirEntries));
    }
    let slot = superblock.dir_count;
    superblock.dir_count += 1;
    Ok(slot)
}
