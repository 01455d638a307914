//! AES加密<br>
//! FIPS 197  <br>
//! [FIPS 197-upd1](https://nvlpubs.nist.gov/nistpubs/FIPS/NIST.FIPS.197-upd1.pdf)<br>
//!
//! 状态按字节表示, 每一轮依次调用[`round`]中的各步骤函数. S盒在编译期由[`gf`]生成.

/// AES is based on the mathematical behavior of binary polynomials<br>
/// (polynomials over GF(2)) modulo the irreducible polynomial x⁸ + x⁴ + x³ + x + 1.<br>
/// 按密钥长度区分AES-128/AES-192/AES-256.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum AES {
    AES128(AES128),
    AES192(AES192),
    AES256(AES256),
}

pub mod gf;
pub mod round;
pub mod sbox;

mod key_schedule;
pub use key_schedule::KeySchedule;
pub use round::State;

mod common;
mod generic;
pub use generic::{AES128, AES192, AES256};


use crate::{BlockDecrypt, BlockEncrypt};

macro_rules! impl_block_cipher {
    ($NAME: ident) => {
        impl BlockEncrypt<16> for $NAME {
            fn encrypt_block(&self, plaintext: &[u8; 16]) -> [u8; 16] {
                self.encrypt_block_inner(plaintext)
            }
        }

        impl BlockDecrypt<16> for $NAME {
            fn decrypt_block(&self, ciphertext: &[u8; 16]) -> [u8; 16] {
                self.decrypt_block_inner(ciphertext)
            }
        }

        impl_slice_cipher!($NAME, 16);
    };
}

impl_block_cipher!(AES128);
impl_block_cipher!(AES192);
impl_block_cipher!(AES256);
impl_block_cipher!(AES);
