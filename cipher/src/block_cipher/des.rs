//! DES加密<br>
//! FIPS 46-3 <br>
//!
//! 64位分组, 56位有效密钥(每字节最低位为奇偶校验位, 不参与运算), 16轮Feistel结构. <br>
//! 置换表中的位序号从1开始, 1为最高位.

use crate::{BlockDecrypt, BlockEncrypt, CipherError};
use std::fmt::{Debug, Formatter};
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

const IP: [u8; 64] = [
    58, 50, 42, 34, 26, 18, 10, 2, 60, 52, 44, 36, 28, 20, 12, 4, 62, 54, 46, 38, 30, 22, 14, 6,
    64, 56, 48, 40, 32, 24, 16, 8, 57, 49, 41, 33, 25, 17, 9, 1, 59, 51, 43, 35, 27, 19, 11, 3, 61,
    53, 45, 37, 29, 21, 13, 5, 63, 55, 47, 39, 31, 23, 15, 7,
];

const FP: [u8; 64] = [
    40, 8, 48, 16, 56, 24, 64, 32, 39, 7, 47, 15, 55, 23, 63, 31, 38, 6, 46, 14, 54, 22, 62, 30,
    37, 5, 45, 13, 53, 21, 61, 29, 36, 4, 44, 12, 52, 20, 60, 28, 35, 3, 43, 11, 51, 19, 59, 27, 34,
    2, 42, 10, 50, 18, 58, 26, 33, 1, 41, 9, 49, 17, 57, 25,
];

// 32位扩展为48位
const E: [u8; 48] = [
    32, 1, 2, 3, 4, 5, 4, 5, 6, 7, 8, 9, 8, 9, 10, 11, 12, 13, 12, 13, 14, 15, 16, 17, 16, 17, 18,
    19, 20, 21, 20, 21, 22, 23, 24, 25, 24, 25, 26, 27, 28, 29, 28, 29, 30, 31, 32, 1,
];

const P: [u8; 32] = [
    16, 7, 20, 21, 29, 12, 28, 17, 1, 15, 23, 26, 5, 18, 31, 10, 2, 8, 24, 14, 32, 27, 3, 9, 19,
    13, 30, 6, 22, 11, 4, 25,
];

const PC1: [u8; 56] = [
    57, 49, 41, 33, 25, 17, 9, 1, 58, 50, 42, 34, 26, 18, 10, 2, 59, 51, 43, 35, 27, 19, 11, 3, 60,
    52, 44, 36, 63, 55, 47, 39, 31, 23, 15, 7, 62, 54, 46, 38, 30, 22, 14, 6, 61, 53, 45, 37, 29,
    21, 13, 5, 28, 20, 12, 4,
];

const PC2: [u8; 48] = [
    14, 17, 11, 24, 1, 5, 3, 28, 15, 6, 21, 10, 23, 19, 12, 4, 26, 8, 16, 7, 27, 20, 13, 2, 41, 52,
    31, 37, 47, 55, 30, 40, 51, 45, 33, 48, 44, 49, 39, 56, 34, 53, 46, 42, 50, 36, 29, 32,
];

const SHIFTS: [u32; 16] = [1, 1, 2, 2, 2, 2, 2, 2, 1, 2, 2, 2, 2, 2, 2, 1];

// SBOX[i][row * 16 + col]
const SBOX: [[u8; 64]; 8] = [
    [
        14, 4, 13, 1, 2, 15, 11, 8, 3, 10, 6, 12, 5, 9, 0, 7, 0, 15, 7, 4, 14, 2, 13, 1, 10, 6, 12,
        11, 9, 5, 3, 8, 4, 1, 14, 8, 13, 6, 2, 11, 15, 12, 9, 7, 3, 10, 5, 0, 15, 12, 8, 2, 4, 9, 1,
        7, 5, 11, 3, 14, 10, 0, 6, 13,
    ],
    [
        15, 1, 8, 14, 6, 11, 3, 4, 9, 7, 2, 13, 12, 0, 5, 10, 3, 13, 4, 7, 15, 2, 8, 14, 12, 0, 1,
        10, 6, 9, 11, 5, 0, 14, 7, 11, 10, 4, 13, 1, 5, 8, 12, 6, 9, 3, 2, 15, 13, 8, 10, 1, 3, 15,
        4, 2, 11, 6, 7, 12, 0, 5, 14, 9,
    ],
    [
        10, 0, 9, 14, 6, 3, 15, 5, 1, 13, 12, 7, 11, 4, 2, 8, 13, 7, 0, 9, 3, 4, 6, 10, 2, 8, 5, 14,
        12, 11, 15, 1, 13, 6, 4, 9, 8, 15, 3, 0, 11, 1, 2, 12, 5, 10, 14, 7, 1, 10, 13, 0, 6, 9, 8,
        7, 4, 15, 14, 3, 11, 5, 2, 12,
    ],
    [
        7, 13, 14, 3, 0, 6, 9, 10, 1, 2, 8, 5, 11, 12, 4, 15, 13, 8, 11, 5, 6, 15, 0, 3, 4, 7, 2, 12,
        1, 10, 14, 9, 10, 6, 9, 0, 12, 11, 7, 13, 15, 1, 3, 14, 5, 2, 8, 4, 3, 15, 0, 6, 10, 1, 13,
        8, 9, 4, 5, 11, 12, 7, 2, 14,
    ],
    [
        2, 12, 4, 1, 7, 10, 11, 6, 8, 5, 3, 15, 13, 0, 14, 9, 14, 11, 2, 12, 4, 7, 13, 1, 5, 0, 15,
        10, 3, 9, 8, 6, 4, 2, 1, 11, 10, 13, 7, 8, 15, 9, 12, 5, 6, 3, 0, 14, 11, 8, 12, 7, 1, 14, 2,
        13, 6, 15, 0, 9, 10, 4, 5, 3,
    ],
    [
        12, 1, 10, 15, 9, 2, 6, 8, 0, 13, 3, 4, 14, 7, 5, 11, 10, 15, 4, 2, 7, 12, 9, 5, 6, 1, 13,
        14, 0, 11, 3, 8, 9, 14, 15, 5, 2, 8, 12, 3, 7, 0, 4, 10, 1, 13, 11, 6, 4, 3, 2, 12, 9, 5, 15,
        10, 11, 14, 1, 7, 6, 0, 8, 13,
    ],
    [
        4, 11, 2, 14, 15, 0, 8, 13, 3, 12, 9, 7, 5, 10, 6, 1, 13, 0, 11, 7, 4, 9, 1, 10, 14, 3, 5,
        12, 2, 15, 8, 6, 1, 4, 11, 13, 12, 3, 7, 14, 10, 15, 6, 8, 0, 5, 9, 2, 6, 11, 13, 8, 1, 4,
        10, 7, 9, 5, 0, 15, 14, 2, 3, 12,
    ],
    [
        13, 2, 8, 4, 6, 15, 11, 1, 10, 9, 3, 14, 5, 0, 12, 7, 1, 15, 13, 8, 10, 3, 7, 4, 12, 5, 6,
        11, 0, 14, 9, 2, 7, 11, 4, 1, 9, 12, 14, 2, 0, 6, 10, 13, 15, 3, 5, 8, 2, 1, 14, 7, 4, 10, 8,
        13, 15, 12, 9, 0, 3, 5, 6, 11,
    ],
];

const MASK28: u64 = (1 << 28) - 1;

/// 按置换表从`bits`位宽的输入中依次取位
#[inline]
fn permute(input: u64, bits: u32, table: &[u8]) -> u64 {
    table.iter().fold(0u64, |out, &pos| {
        (out << 1) | ((input >> (bits - u32::from(pos))) & 1)
    })
}

#[inline]
fn rotl28(x: u64, n: u32) -> u64 {
    ((x << n) | (x >> (28 - n))) & MASK28
}

/// 轮函数f(R, K)
fn feistel(r: u32, subkey: u64) -> u32 {
    let e = permute(u64::from(r), 32, &E) ^ subkey;
    let s = SBOX.iter().enumerate().fold(0u64, |out, (i, sbox)| {
        let six = (e >> (42 - 6 * i)) & 0x3f;
        let (row, col) = (((six & 0x20) >> 4) | (six & 1), (six >> 1) & 0xf);
        (out << 4) | u64::from(sbox[(row * 16 + col) as usize])
    });
    permute(s, 32, &P) as u32
}

#[derive(Clone, PartialEq, Eq)]
pub struct DES {
    // 16个48位子密钥
    subkeys: [u64; 16],
}

impl DES {
    pub const KEY_SIZE: usize = 8;
    pub const BLOCK_SIZE: usize = 8;

    pub fn new(key: &[u8]) -> Result<Self, CipherError> {
        #[cfg_attr(not(feature = "sec-zeroize"), allow(unused_mut))]
        let mut key: [u8; 8] = key
            .try_into()
            .map_err(|_| CipherError::InvalidKeyLength { real: key.len() })?;

        let k56 = permute(u64::from_be_bytes(key), 64, &PC1);
        let (mut c, mut d) = ((k56 >> 28) & MASK28, k56 & MASK28);
        let mut subkeys = [0u64; 16];
        for (sk, &n) in subkeys.iter_mut().zip(SHIFTS.iter()) {
            c = rotl28(c, n);
            d = rotl28(d, n);
            *sk = permute((c << 28) | d, 56, &PC2);
        }

        #[cfg(feature = "sec-zeroize")]
        {
            key.zeroize();
            c.zeroize();
            d.zeroize();
        }

        Ok(Self { subkeys })
    }

    fn crypt<'a>(data: &[u8; 8], subkeys: impl Iterator<Item = &'a u64>) -> [u8; 8] {
        let ip = permute(u64::from_be_bytes(*data), 64, &IP);
        let (mut l, mut r) = ((ip >> 32) as u32, ip as u32);
        for &k in subkeys {
            (l, r) = (r, l ^ feistel(r, k));
        }

        // 最后一轮不交换
        permute((u64::from(r) << 32) | u64::from(l), 64, &FP).to_be_bytes()
    }
}

impl BlockEncrypt<8> for DES {
    fn encrypt_block(&self, plaintext: &[u8; 8]) -> [u8; 8] {
        Self::crypt(plaintext, self.subkeys.iter())
    }
}

impl BlockDecrypt<8> for DES {
    fn decrypt_block(&self, ciphertext: &[u8; 8]) -> [u8; 8] {
        Self::crypt(ciphertext, self.subkeys.iter().rev())
    }
}

impl_slice_cipher!(DES, 8);

impl Debug for DES {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DES").finish_non_exhaustive()
    }
}

#[cfg(feature = "sec-zeroize")]
impl Zeroize for DES {
    fn zeroize(&mut self) {
        self.subkeys.zeroize();
    }
}

#[cfg(feature = "sec-zeroize-drop")]
impl Drop for DES {
    fn drop(&mut self) {
        self.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::DES;
    use crate::{BlockDecrypt, BlockEncrypt, CipherError, Encrypt};

    fn block(s: &str) -> [u8; 8] {
        hex::decode(s).unwrap().try_into().unwrap()
    }

    #[test]
    fn des_known_answer() {
        let cases = [
            ("133457799bbcdff1", "0123456789abcdef", "85e813540f0ab405"),
            ("0e329232ea6d0d73", "8787878787878787", "0000000000000000"),
            ("0000000000000000", "0000000000000000", "8ca64de9c1b123a7"),
            ("0123456789abcdef", "4e6f772069732074", "3fa40e8a984d4815"),
        ];

        for (i, (key, pt, ct)) in cases.into_iter().enumerate() {
            let des = DES::new(&block(key)).unwrap();
            let (pt, ct) = (block(pt), block(ct));
            assert_eq!(des.encrypt_block(&pt), ct, "case {i} encrypt failed");
            assert_eq!(des.decrypt_block(&ct), pt, "case {i} decrypt failed");
        }
    }

    #[test]
    fn des_parity_bits_ignored() {
        let (k1, k2) = (block("133457799bbcdff1"), block("123456789abcdef0"));
        let (d1, d2) = (DES::new(&k1).unwrap(), DES::new(&k2).unwrap());
        let pt = block("0123456789abcdef");
        assert_eq!(d1.encrypt_block(&pt), d2.encrypt_block(&pt));
    }

    #[test]
    fn des_invalid_length() {
        assert_eq!(
            DES::new(&[0u8; 7]),
            Err(CipherError::InvalidKeyLength { real: 7 })
        );
        assert!(DES::new(&[0u8; 16]).is_err());

        let des = DES::new(&[0u8; 8]).unwrap();
        assert_eq!(
            des.encrypt(&[0u8; 16], &mut vec![]),
            Err(CipherError::InvalidBlockLength {
                target: 8,
                real: 16
            })
        );
    }
}
