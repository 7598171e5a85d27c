//! Data transfer between callers and a file's blocks.
//! Every byte is XORed with `XOR_KEY` on the way in and out. That is obfuscation, not encryption.

use crate::allocator::data_blocks_for;
use crate::config::*;
use crate::inode::{bmap, bmap_alloc};
use crate::{BlockDevice, Inode, Result, SuperBlock};

fn xor_copy(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d = s ^ XOR_KEY;
    }
}

/// Writes the whole content of a freshly allocated inode, allocating its blocks in order.
/// Returns the number of bytes written.
pub fn fwrite(
    device: &mut impl BlockDevice,
    superblock: &mut SuperBlock,
    inode: &mut Inode,
    buffer: &[u8],
) -> Result<usize> {
    let mut block_buf = [0u8; BLOCK_SIZE];
    let mut bytes_written = 0;

    for chunk in buffer.chunks(BLOCK_SIZE) {
        let block_id = bmap_alloc(device, superblock, inode)?;
        block_buf.fill(0);
        xor_copy(&mut block_buf[..chunk.len()], chunk);
        device.write_block(block_id, &block_buf)?;
        bytes_written += chunk.len();
    }

    inode.size = bytes_written as u64;
    debug_assert_eq!(inode.blocks as usize, data_blocks_for(inode.size));
    Ok(bytes_written)
}

/// Reads data from a file into the provided buffer, starting at `offset`.
/// Stops at the end of the file or of the buffer, whichever comes first.
/// Returns the number of bytes read.
pub fn fread(
    device: &impl BlockDevice,
    inode: &Inode,
    offset: usize,
    buffer: &mut [u8],
) -> Result<usize> {
    let size = inode.size as usize;
    if offset >= size {
        return Ok(0);
    }

    let to_read = buffer.len().min(size - offset);
    let mut bytes_read = 0;
    let mut current_offset = offset;
    let mut block_buf = [0u8; BLOCK_SIZE];

    while bytes_read < to_read {
        let block_id = bmap(device, inode, current_offset / BLOCK_SIZE)?;
        device.read_block(block_id, &mut block_buf)?;

        let start_offset = current_offset % BLOCK_SIZE;
        let n = (BLOCK_SIZE - start_offset).min(to_read - bytes_read);
        xor_copy(
            &mut buffer[bytes_read..bytes_read + n],
            &block_buf[start_offset..start_offset + n],
        );

        bytes_read += n;
        current_offset += n;
    }

    Ok(bytes_read)
}
