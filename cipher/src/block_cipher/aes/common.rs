use crate::CipherError;
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

use super::{AES, AES128, AES192, AES256};

impl AES {
    pub const BLOCK_SIZE: usize = 16;

    /// 根据密钥长度(16/24/32字节)选择AES-128/AES-192/AES-256
    pub fn new(key: &[u8]) -> Result<AES, CipherError> {
        match key.len() {
            AES128::KEY_SIZE => AES::aes128(key).map(AES::AES128),
            AES192::KEY_SIZE => AES::aes192(key).map(AES::AES192),
            AES256::KEY_SIZE => AES::aes256(key).map(AES::AES256),
            _ => Err(CipherError::InvalidKeyLength { real: key.len() }),
        }
    }

    pub fn aes128(key: &[u8]) -> Result<AES128, CipherError> {
        AES128::try_from_slice(key)
    }

    pub fn aes192(key: &[u8]) -> Result<AES192, CipherError> {
        AES192::try_from_slice(key)
    }

    pub fn aes256(key: &[u8]) -> Result<AES256, CipherError> {
        AES256::try_from_slice(key)
    }

    pub const fn key_size(&self) -> usize {
        match self {
            AES::AES128(_) => AES128::KEY_SIZE,
            AES::AES192(_) => AES192::KEY_SIZE,
            AES::AES256(_) => AES256::KEY_SIZE,
        }
    }

    /// 加密轮数
    pub const fn rounds(&self) -> usize {
        match self {
            AES::AES128(_) => AES128::NR,
            AES::AES192(_) => AES192::NR,
            AES::AES256(_) => AES256::NR,
        }
    }

    pub(super) fn encrypt_block_inner(&self, data: &[u8; 16]) -> [u8; 16] {
        match self {
            AES::AES128(aes) => aes.encrypt_block_inner(data),
            AES::AES192(aes) => aes.encrypt_block_inner(data),
            AES::AES256(aes) => aes.encrypt_block_inner(data),
        }
    }

    pub(super) fn decrypt_block_inner(&self, data: &[u8; 16]) -> [u8; 16] {
        match self {
            AES::AES128(aes) => aes.decrypt_block_inner(data),
            AES::AES192(aes) => aes.decrypt_block_inner(data),
            AES::AES256(aes) => aes.decrypt_block_inner(data),
        }
    }
}

#[cfg(feature = "sec-zeroize")]
impl Zeroize for AES {
    fn zeroize(&mut self) {
        match self {
            AES::AES128(aes) => aes.zeroize(),
            AES::AES192(aes) => aes.zeroize(),
            AES::AES256(aes) => aes.zeroize(),
        }
    }
}
