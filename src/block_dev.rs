use crate::config::BLOCK_SIZE;
use crate::error::{FsError, Result};

pub trait BlockDevice {
    /// Returns the number of blocks in the block device.
    fn num_blocks(&self) -> usize;

    /// Reads a block of data from the block device.
    fn read_block(&self, block_id: u32, buf: &mut [u8; BLOCK_SIZE]) -> Result<()>;

    /// Writes a block of data to the block device.
    fn write_block(&mut self, block_id: u32, buf: &[u8; BLOCK_SIZE]) -> Result<()>;

    /// Returns the size of each block in bytes.
    fn block_size(&self) -> usize {
        BLOCK_SIZE
    }
}

/// Zero-initialized blocks held in process memory.
pub struct MemDisk {
    blocks: Vec<[u8; BLOCK_SIZE]>,
}

impl MemDisk {
    pub fn new(num_blocks: usize) -> Self {
        MemDisk {
            blocks: vec![[0u8; BLOCK_SIZE]; num_blocks],
        }
    }

    fn block(&self, block_id: u32) -> Result<&[u8; BLOCK_SIZE]> {
        self.blocks
            .get(block_id as usize)
            .ok_or(FsError::InvalidBlockId(block_id))
    }
}

impl BlockDevice for MemDisk {
    fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    fn read_block(&self, block_id: u32, buf: &mut [u8; BLOCK_SIZE]) -> Result<()> {
        buf.copy_from_slice(self.block(block_id)?);
        Ok(())
    }

    fn write_block(&mut self, block_id: u32, buf: &[u8; BLOCK_SIZE]) -> Result<()> {
        let block = self
            .blocks
            .get_mut(block_id as usize)
            .ok_or(FsError::InvalidBlockId(block_id))?;
        block.copy_from_slice(buf);
        Ok(())
    }
}
