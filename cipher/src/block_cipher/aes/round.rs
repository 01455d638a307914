//! 轮变换 <br>
//!
//! 加密轮: SubBytes -> ShiftRows -> MixColumns -> AddRoundKey, 最后一轮没有MixColumns. <br>
//! 解密轮: InvShiftRows -> InvSubBytes -> AddRoundKey -> InvMixColumns, 最后一轮没有InvMixColumns. <br>
//! 第0轮只有AddRoundKey, 由调用者完成.

use super::gf::{multiply, xtime};
use super::sbox::{substitute, INV_SBOX, SBOX};

pub type RoundKey = [u8; 16];

/// 4x4字节状态矩阵, 按列存储: `self.0[c][r]`即FIPS 197中的`s_{r,c}`
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct State([[u8; 4]; 4]);

impl State {
    pub fn from_block(block: &[u8; 16]) -> Self {
        let mut s = [[0u8; 4]; 4];
        for (col, chunk) in s.iter_mut().zip(block.chunks_exact(4)) {
            col.copy_from_slice(chunk);
        }
        Self(s)
    }

    pub fn to_block(&self) -> [u8; 16] {
        let mut block = [0u8; 16];
        for (chunk, col) in block.chunks_exact_mut(4).zip(self.0.iter()) {
            chunk.copy_from_slice(col);
        }
        block
    }

    pub fn sub_bytes(&mut self) {
        self.0
            .iter_mut()
            .flatten()
            .for_each(|b| *b = substitute(*b, &SBOX));
    }

    pub fn inv_sub_bytes(&mut self) {
        self.0
            .iter_mut()
            .flatten()
            .for_each(|b| *b = substitute(*b, &INV_SBOX));
    }

    /// 第`r`行循环左移`r`字节
    pub fn shift_rows(&mut self) {
        for r in 1..4 {
            let row = [self.0[0][r], self.0[1][r], self.0[2][r], self.0[3][r]];
            for c in 0..4 {
                self.0[c][r] = row[(c + r) % 4];
            }
        }
    }

    pub fn inv_shift_rows(&mut self) {
        for r in 1..4 {
            let row = [self.0[0][r], self.0[1][r], self.0[2][r], self.0[3][r]];
            for c in 0..4 {
                self.0[c][r] = row[(c + 4 - r) % 4];
            }
        }
    }

    /// 每列左乘矩阵`[02 03 01 01; 01 02 03 01; 01 01 02 03; 03 01 01 02]`
    pub fn mix_columns(&mut self) {
        for col in self.0.iter_mut() {
            let [a0, a1, a2, a3] = *col;
            let (d0, d1, d2, d3) = (xtime(a0), xtime(a1), xtime(a2), xtime(a3));
            *col = [
                d0 ^ d1 ^ a1 ^ a2 ^ a3,
                a0 ^ d1 ^ d2 ^ a2 ^ a3,
                a0 ^ a1 ^ d2 ^ d3 ^ a3,
                d0 ^ a0 ^ a1 ^ a2 ^ d3,
            ];
        }
    }

    /// 每列左乘矩阵`[0e 0b 0d 09; 09 0e 0b 0d; 0d 09 0e 0b; 0b 0d 09 0e]`
    pub fn inv_mix_columns(&mut self) {
        for col in self.0.iter_mut() {
            let [a0, a1, a2, a3] = *col;
            *col = [
                multiply(a0, 0x0e) ^ multiply(a1, 0x0b) ^ multiply(a2, 0x0d) ^ multiply(a3, 0x09),
                multiply(a0, 0x09) ^ multiply(a1, 0x0e) ^ multiply(a2, 0x0b) ^ multiply(a3, 0x0d),
                multiply(a0, 0x0d) ^ multiply(a1, 0x09) ^ multiply(a2, 0x0e) ^ multiply(a3, 0x0b),
                multiply(a0, 0x0b) ^ multiply(a1, 0x0d) ^ multiply(a2, 0x09) ^ multiply(a3, 0x0e),
            ];
        }
    }

    pub fn add_round_key(&mut self, key: &RoundKey) {
        self.0
            .iter_mut()
            .flatten()
            .zip(key.iter())
            .for_each(|(s, k)| *s ^= k);
    }
}

pub fn encrypt_round(mut state: State, round_key: &RoundKey, is_final: bool) -> State {
    state.sub_bytes();
    state.shift_rows();
    if !is_final {
        state.mix_columns();
    }
    state.add_round_key(round_key);
    state
}

/// `round_key`需按加密时相反的顺序传入
pub fn decrypt_round(mut state: State, round_key: &RoundKey, is_final: bool) -> State {
    state.inv_shift_rows();
    state.inv_sub_bytes();
    state.add_round_key(round_key);
    if !is_final {
        state.inv_mix_columns();
    }
    state
}
