//! 分组密码 <br>
//!
//! 分组密码只负责单个定长分组的变换, 多分组消息的处理见[`crate::cipher_mode`].

pub trait BlockEncrypt<const BLOCK_SIZE: usize> {
    fn encrypt_block(&self, plaintext: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE];
}

pub trait BlockDecrypt<const BLOCK_SIZE: usize> {
    fn decrypt_block(&self, ciphertext: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE];
}

pub trait BlockCipher<const N: usize>: BlockEncrypt<N> + BlockDecrypt<N> {
    const BLOCK_SIZE: usize = N;
}

impl<T, const N: usize> BlockCipher<N> for T where T: BlockDecrypt<N> + BlockEncrypt<N> {}

impl<T: BlockEncrypt<N> + ?Sized, const N: usize> BlockEncrypt<N> for &T {
    fn encrypt_block(&self, plaintext: &[u8; N]) -> [u8; N] {
        (**self).encrypt_block(plaintext)
    }
}

impl<T: BlockDecrypt<N> + ?Sized, const N: usize> BlockDecrypt<N> for &T {
    fn decrypt_block(&self, ciphertext: &[u8; N]) -> [u8; N] {
        (**self).decrypt_block(ciphertext)
    }
}

/// 为分组密码实现切片形式的[`crate::Encrypt`]/[`crate::Decrypt`], 输入必须恰好是一个分组
macro_rules! impl_slice_cipher {
    ($NAME: ident, $N: literal) => {
        impl $crate::Encrypt for $NAME {
            fn encrypt(
                &self,
                plaintext: &[u8],
                ciphertext: &mut Vec<u8>,
            ) -> Result<(), $crate::CipherError> {
                match utils::Block::as_arr_ref::<$N>(plaintext) {
                    Some(block) => {
                        ciphertext.extend(<Self as $crate::BlockEncrypt<$N>>::encrypt_block(self, block));
                        Ok(())
                    }
                    None => Err($crate::CipherError::InvalidBlockLength {
                        target: $N,
                        real: plaintext.len(),
                    }),
                }
            }
        }

        impl $crate::Decrypt for $NAME {
            fn decrypt(
                &self,
                ciphertext: &[u8],
                plaintext: &mut Vec<u8>,
            ) -> Result<(), $crate::CipherError> {
                match utils::Block::as_arr_ref::<$N>(ciphertext) {
                    Some(block) => {
                        plaintext.extend(<Self as $crate::BlockDecrypt<$N>>::decrypt_block(self, block));
                        Ok(())
                    }
                    None => Err($crate::CipherError::InvalidBlockLength {
                        target: $N,
                        real: ciphertext.len(),
                    }),
                }
            }
        }
    };
}

mod aes;
pub use aes::{gf, round, sbox, KeySchedule, State, AES, AES128, AES192, AES256};

mod des;
pub use des::DES;
