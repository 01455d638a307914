use crate::CipherError;

pub trait BlockPadding {
    /// 填充到`block_size`字节的整数倍
    fn new(block_size: usize) -> Self;

    fn padding(&self, buf: &mut Vec<u8>);

    fn unpadding(&self, buf: &mut Vec<u8>) -> Result<(), CipherError>;

    /// 最长补几个块
    fn max_padding_blocks(&self) -> usize;
}

/// 填充`n`个值为`n`的字节, `1 <= n <= block_size`, 数据已对齐时补一个整块. <br>
/// 去填充失败时只返回`InvalidPadding`, 不区分失败原因.
#[derive(Copy, Clone, Debug)]
pub struct Pkcs7Padding {
    block_size: usize,
}

impl Pkcs7Padding {
    pub fn block_size(&self) -> usize {
        self.block_size
    }
}

impl BlockPadding for Pkcs7Padding {
    fn new(block_size: usize) -> Self {
        debug_assert!((1..=255).contains(&block_size));
        Self { block_size }
    }

    fn padding(&self, buf: &mut Vec<u8>) {
        let n = self.block_size - (buf.len() % self.block_size);
        buf.resize(buf.len() + n, n as u8);
    }

    fn unpadding(&self, buf: &mut Vec<u8>) -> Result<(), CipherError> {
        let len = buf.len();
        if len == 0 || len % self.block_size != 0 {
            return Err(CipherError::InvalidPadding);
        }

        let n = buf[len - 1] as usize;
        if n == 0 || n > self.block_size {
            return Err(CipherError::InvalidPadding);
        }

        // 检查所有填充字节后再判断
        let diff = buf[(len - n)..]
            .iter()
            .fold(0u8, |acc, &b| acc | (b ^ n as u8));
        if diff != 0 {
            return Err(CipherError::InvalidPadding);
        }

        buf.truncate(len - n);
        Ok(())
    }

    fn max_padding_blocks(&self) -> usize {
        1
    }
}

/// 不填充, 输入必须是分组长度的整数倍
#[derive(Copy, Clone, Debug)]
pub struct EmptyPadding;

impl BlockPadding for EmptyPadding {
    fn new(_block_size: usize) -> Self {
        Self
    }

    fn padding(&self, _buf: &mut Vec<u8>) {}

    fn unpadding(&self, _buf: &mut Vec<u8>) -> Result<(), CipherError> {
        Ok(())
    }

    fn max_padding_blocks(&self) -> usize {
        0
    }
}
