use super::{check_aligned, try_for_each_chunk, BlockPadding};
use crate::block_cipher::{AES, DES};
use crate::{BlockDecrypt, BlockEncrypt, CipherError, Decrypt, Encrypt};
use utils::Block;
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

/// Electronic Codebook Mode <br>
///
/// `ECB<Padding, BlockCipher, BLOCK_SIZE>`, 相同的明文分组总是得到相同的密文分组.
#[derive(Clone)]
pub struct ECB<P, E, const N: usize> {
    cipher: E,
    padding: P,
}

pub type AESEcb<P> = ECB<P, AES, 16>;
pub type DESEcb<P> = ECB<P, DES, 8>;

impl<P: BlockPadding, E, const N: usize> ECB<P, E, N> {
    pub fn new(cipher: E) -> Self {
        Self {
            padding: P::new(N),
            cipher,
        }
    }

    pub fn set_padding(&mut self, padding: P) {
        self.padding = padding;
    }

    pub fn cipher(&self) -> &E {
        &self.cipher
    }
}

#[cfg(feature = "sec-zeroize")]
impl<P, E: Zeroize, const N: usize> Zeroize for ECB<P, E, N> {
    fn zeroize(&mut self) {
        self.cipher.zeroize();
    }
}

impl<P, E, const N: usize> Encrypt for ECB<P, E, N>
where
    P: BlockPadding + Sync,
    E: BlockEncrypt<N> + Sync,
{
    fn encrypt(&self, plaintext: &[u8], ciphertext: &mut Vec<u8>) -> Result<(), CipherError> {
        let mut buf = Vec::with_capacity(plaintext.len() + N * self.padding.max_padding_blocks());
        buf.extend_from_slice(plaintext);
        self.padding.padding(&mut buf);
        check_aligned::<N>(&buf)?;

        try_for_each_chunk(&mut buf, N, |_, chunk| {
            let block = Block::as_arr_mut_uncheck::<N>(chunk);
            *block = self.cipher.encrypt_block(block);
            Ok(())
        })?;

        ciphertext.append(&mut buf);
        Ok(())
    }
}

impl<P, E, const N: usize> Decrypt for ECB<P, E, N>
where
    P: BlockPadding + Sync,
    E: BlockDecrypt<N> + Sync,
{
    fn decrypt(&self, ciphertext: &[u8], plaintext: &mut Vec<u8>) -> Result<(), CipherError> {
        check_aligned::<N>(ciphertext)?;

        let mut buf = Block::from(ciphertext);
        try_for_each_chunk(&mut buf, N, |_, chunk| {
            let block = Block::as_arr_mut_uncheck::<N>(chunk);
            *block = self.cipher.decrypt_block(block);
            Ok(())
        })?;

        self.padding.unpadding(buf.as_mut())?;
        plaintext.extend_from_slice(&buf);
        Ok(())
    }
}
