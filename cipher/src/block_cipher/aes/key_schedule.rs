use super::round::RoundKey;
use super::sbox::{substitute, SBOX};
use crate::CipherError;
use std::fmt::{Debug, Formatter};
use utils::Block;
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

/// 轮常数`x^(i-1)`, 字的最高字节
const RCON: [u8; 10] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36];

// AES-256扩展后的字长
const MAX_WORDS: usize = 60;

/// 轮密钥序列, 共`R = NR + 1`个轮密钥. <br>
/// 只能由密钥扩展生成, 生成后只读.
#[derive(Clone, PartialEq, Eq)]
pub struct KeySchedule<const R: usize> {
    round_keys: [RoundKey; R],
}

impl<const R: usize> KeySchedule<R> {
    /// 加密轮数
    pub const NR: usize = R - 1;
    /// 密钥字长
    const NK: usize = R - 7;
    pub const KEY_SIZE: usize = Self::NK * 4;

    /// 密钥扩展, 密钥长度与轮数不匹配时返回`InvalidKeyLength`
    pub fn expand(key: &[u8]) -> Result<Self, CipherError> {
        if !matches!(R, 11 | 13 | 15) || key.len() != Self::KEY_SIZE {
            return Err(CipherError::InvalidKeyLength { real: key.len() });
        }

        Ok(Self::expand_uncheck(key))
    }

    /// 调用者保证`key.len() == Self::KEY_SIZE`
    pub(super) fn expand_uncheck(key: &[u8]) -> Self {
        let (nk, words) = (Self::NK, R << 2);
        let mut w = [0u32; MAX_WORDS];

        for (k, chunk) in w.iter_mut().zip(key.chunks_exact(4)) {
            *k = u32::from_be_bytes(Block::to_arr_uncheck(chunk));
        }

        for i in nk..words {
            let tmp = w[i - 1];
            let t = if i % nk == 0 {
                sub_word(tmp.rotate_left(8)) ^ (u32::from(RCON[i / nk - 1]) << 24)
            } else if nk > 6 && i % nk == 4 {
                sub_word(tmp)
            } else {
                tmp
            };
            w[i] = w[i - nk] ^ t;
        }

        let mut round_keys = [[0u8; 16]; R];
        for (rk, ws) in round_keys.iter_mut().zip(w.chunks_exact(4)) {
            for (dst, word) in rk.chunks_exact_mut(4).zip(ws.iter()) {
                dst.copy_from_slice(&word.to_be_bytes());
            }
        }

        #[cfg(feature = "sec-zeroize")]
        w.zeroize();

        log::trace!("expand AES-{} key schedule", Self::KEY_SIZE << 3);

        Self { round_keys }
    }

    /// 第`round`轮的轮密钥, `round <= NR`
    pub fn round_key(&self, round: usize) -> &RoundKey {
        &self.round_keys[round]
    }

    pub fn round_keys(&self) -> &[RoundKey] {
        self.round_keys.as_slice()
    }

    pub const fn rounds(&self) -> usize {
        Self::NR
    }
}

#[inline]
fn sub_word(w: u32) -> u32 {
    u32::from_be_bytes(w.to_be_bytes().map(|b| substitute(b, &SBOX)))
}

impl<const R: usize> Debug for KeySchedule<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeySchedule")
            .field("rounds", &Self::NR)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "sec-zeroize")]
impl<const R: usize> Zeroize for KeySchedule<R> {
    fn zeroize(&mut self) {
        self.round_keys.iter_mut().for_each(|k| k.zeroize());
    }
}

#[cfg(feature = "sec-zeroize-drop")]
impl<const R: usize> Drop for KeySchedule<R> {
    fn drop(&mut self) {
        self.zeroize();
    }
}
