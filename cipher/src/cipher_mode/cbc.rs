use super::{check_aligned, try_for_each_chunk, BlockPadding};
use crate::block_cipher::{AES, DES};
use crate::{BlockDecrypt, BlockEncrypt, CipherError, Decrypt, Encrypt};
use utils::Block;
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

/// Cipher Block Chaining Mode(CBC) <br>
///
/// 给定初始向量IV, IV可以不保密, 但是**它必须是不可预测的(unpredictable)**. 因此, 每次加密需调用`self.set_iv`设置新的`IV`. <br>
/// 加密只能串行, 解密按分组并行.
#[derive(Clone)]
pub struct CBC<P, E, const N: usize> {
    /// 初始化向量
    iv: [u8; N],
    cipher: E,
    padding: P,
}

pub type AESCbc<P> = CBC<P, AES, 16>;
pub type DESCbc<P> = CBC<P, DES, 8>;

impl<P: BlockPadding, E, const N: usize> CBC<P, E, N> {
    pub fn new(cipher: E, iv: [u8; N]) -> Self {
        Self {
            iv,
            padding: P::new(N),
            cipher,
        }
    }

    pub fn set_padding(&mut self, padding: P) {
        self.padding = padding;
    }

    pub fn set_iv(&mut self, iv: [u8; N]) {
        self.iv = iv;
    }

    pub fn cipher(&self) -> &E {
        &self.cipher
    }
}

impl<P, E, const N: usize> CBC<P, E, N>
where
    E: BlockEncrypt<N>,
{
    fn encrypt_inner(cipher: &E, iv: &mut [u8; N], block: &mut [u8; N]) {
        Block::xor(iv, block);
        *iv = cipher.encrypt_block(iv);
        *block = *iv;
    }
}

impl<P, E, const N: usize> CBC<P, E, N>
where
    E: BlockDecrypt<N>,
{
    fn decrypt_inner(cipher: &E, prev: &[u8; N], block: &mut [u8; N]) {
        *block = cipher.decrypt_block(block);
        Block::xor(block, prev);
    }
}

#[cfg(feature = "sec-zeroize")]
impl<P, E: Zeroize, const N: usize> Zeroize for CBC<P, E, N> {
    fn zeroize(&mut self) {
        self.iv.zeroize();
        self.cipher.zeroize();
    }
}

impl<P, E, const N: usize> Encrypt for CBC<P, E, N>
where
    P: BlockPadding,
    E: BlockEncrypt<N>,
{
    fn encrypt(&self, plaintext: &[u8], ciphertext: &mut Vec<u8>) -> Result<(), CipherError> {
        let mut buf = Vec::with_capacity(plaintext.len() + N * self.padding.max_padding_blocks());
        buf.extend_from_slice(plaintext);
        self.padding.padding(&mut buf);
        check_aligned::<N>(&buf)?;

        let mut iv = self.iv;
        for chunk in buf.chunks_exact_mut(N) {
            Self::encrypt_inner(&self.cipher, &mut iv, Block::as_arr_mut_uncheck(chunk));
        }

        ciphertext.append(&mut buf);
        Ok(())
    }
}

impl<P, E, const N: usize> Decrypt for CBC<P, E, N>
where
    P: BlockPadding + Sync,
    E: BlockDecrypt<N> + Sync,
{
    fn decrypt(&self, ciphertext: &[u8], plaintext: &mut Vec<u8>) -> Result<(), CipherError> {
        check_aligned::<N>(ciphertext)?;

        let mut buf = Block::from(ciphertext);
        try_for_each_chunk(&mut buf, N, |i, chunk| {
            let prev = if i == 0 {
                &self.iv
            } else {
                Block::as_arr_ref_uncheck(&ciphertext[((i - 1) * N)..(i * N)])
            };
            Self::decrypt_inner(&self.cipher, prev, Block::as_arr_mut_uncheck(chunk));
            Ok(())
        })?;

        self.padding.unpadding(buf.as_mut())?;
        plaintext.extend_from_slice(&buf);
        Ok(())
    }
}
