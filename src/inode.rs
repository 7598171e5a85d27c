//! Inode table and mapping of file blocks to device blocks.


use crate::allocator::{alloc_data_block, alloc_inode_id};
use crate::config::*;
use crate::error::FsError;
use crate::{BlockDevice, Inode, Result, SuperBlock};

pub struct InodeTable {
    inodes: Vec<Inode>,
}

impl InodeTable {
    /// Pre-initializes every slot: no indirect block, group unset.
    pub fn new(num_inodes: u32) -> Self {
        Self {
            inodes: (0..num_inodes).map(Inode::empty).collect(),
        }
    }

    /// Hands out the next inode slot, still in its initial state.
    pub fn alloc(&mut self, superblock: &mut SuperBlock) -> Result<&mut Inode> {
        let inode_id = alloc_inode_id(superblock)?;
        let inode = self
            .inodes
            .get_mut(inode_id as usize)
            .ok_or(FsError::InvalidInodeId(inode_id))?;
        *inode = Inode::empty(inode_id);
        Ok(inode)
    }

    pub fn get(&self, superblock: &SuperBlock, inode_id: u32) -> Result<&Inode> {
        if inode_id >= superblock.inode_count {
            return Err(FsError::InvalidInodeId(inode_id));
        }
        self.inodes
            .get(inode_id as usize)
            .ok_or(FsError::InvalidInodeId(inode_id))
    }

    pub fn get_mut(&mut self, superblock: &SuperBlock, inode_id: u32) -> Result<&mut Inode> {
        if inode_id >= superblock.inode_count {
            return Err(FsError::InvalidInodeId(inode_id));
        }
        self.inodes
            .get_mut(inode_id as usize)
            .ok_or(FsError::InvalidInodeId(inode_id))
    }
}

fn read_ptr(block: &[u8; BLOCK_SIZE], index: usize) -> u32 {
    let start = index * PTR_SIZE;
    let mut raw = [0u8; PTR_SIZE];
    raw.copy_from_slice(&block[start..start + PTR_SIZE]);
    u32::from_le_bytes(raw)
}

fn write_ptr(block: &mut [u8; BLOCK_SIZE], index: usize, block_id: u32) {
    let start = index * PTR_SIZE;
    block[start..start + PTR_SIZE].copy_from_slice(&block_id.to_le_bytes());
}

/// Maps the `block_offset`-th data block of a file to its block id.
pub fn bmap(device: &impl BlockDevice, inode: &Inode, block_offset: usize) -> Result<u32> {
    if block_offset >= inode.blocks as usize {
        return Err(FsError::InvalidBlockId(block_offset as u32));
    }

    // Direct blocks
    if block_offset < NUM_DIRECT_PTRS {
        return inode.direct_ptrs[block_offset].ok_or(FsError::InvalidBlockId(block_offset as u32));
    }

    // Indirect blocks
    let indirect_offset = block_offset - NUM_DIRECT_PTRS;
    let indirect_block_id = inode
        .indirect_ptr
        .ok_or(FsError::InvalidBlockId(block_offset as u32))?;
    let mut ptrs = [0u8; BLOCK_SIZE];
    device.read_block(indirect_block_id, &mut ptrs)?;
    Ok(read_ptr(&ptrs, indirect_offset))
}

/// Allocates the next data block of a file and links it into the inode.
/// Blocks are appended in order, so `inode.blocks` is the offset being mapped.
/// The indirect block is allocated right before the first block that needs it.
pub fn bmap_alloc(
    device: &mut impl BlockDevice,
    superblock: &mut SuperBlock,
    inode: &mut Inode,
) -> Result<u32> {
    let block_offset = inode.blocks as usize;
    if block_offset >= MAX_FILE_BLOCKS {
        return Err(FsError::FileTooLarge);
    }

    // Direct blocks
    if block_offset < NUM_DIRECT_PTRS {
        let block_id = alloc_data_block(device, superblock)?;
        inode.direct_ptrs[block_offset] = Some(block_id);
        inode.blocks += 1;
        return Ok(block_id);
    }

    // Indirect blocks
    let indirect_block_id = match inode.indirect_ptr {
        Some(block_id) => block_id,
        None => {
            let block_id = alloc_data_block(device, superblock)?;
            inode.indirect_ptr = Some(block_id);
            tracing::debug!(inode = inode.id, block_id, "allocated indirect block");
            block_id
        }
    };

    let data_block_id = alloc_data_block(device, superblock)?;
    let mut ptrs = [0u8; BLOCK_SIZE];
    device.read_block(indirect_block_id, &mut ptrs)?;
    write_ptr(&mut ptrs, block_offset - NUM_DIRECT_PTRS, data_block_id);
    device.write_block(indirect_block_id, &ptrs)?;
    inode.blocks += 1;

    Ok(data_block_id)
}
