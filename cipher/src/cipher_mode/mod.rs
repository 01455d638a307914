//! # Recommendation for Block Cipher Mode of Operation: Method and Techniques
//!
//! [Block Cipher Techniques](https://csrc.nist.gov/Projects/block-cipher-techniques/BCM/current-modes)<br>
//! [NIST 800-38A, Recommendation for Block Cipher Modes of operation Methods and Techniques](https://nvlpubs.nist.gov/nistpubs/Legacy/SP/nistspecialpublication800-38a.pdf)<br>
//! <br>
//! ## The Electronic Codebook Mode(ECB)
//!
//! $$
//! C_j = Encrypt(P_j), j = 1...n
//!
//! P_j = Decrypt(C_j), j = 1...n
//! $$
//!
//! 给定的密钥, 每个明文块和密文块一一对应(如果不期待使用这一特性, 不应该使用ECB模式), 加解密都可并行. <br>
//! <br>
//! ## The Cipher Block Chaining Mode(CBC)
//!
//! 给定初始向量IV, IV可以不保密, 但是**它必须是不可预测的(unpredictable)**. <br>
//!
//! $$
//! C_1 = Encrypt(P_1 \xor IV); C_j = Encrypt(P_j \xor C_{j-1}), j = 2...n
//!
//! P_1 = Decrypt(C_1) \xor IV; P_j = Decrypt(C_j) \xor C_{j-1}, j = 2...n
//! $$
//!
//! 在CBC模式中, 加密每个明文块依赖前一个密文输出, 故Encrypt无法并行. 但Decrypt是可以并行的. <br>
//! <br>
//! ## The Counter Mode(CTR)
//!
//! 给定计数器, 其生成的计数值$T_i$每个都需要是相异的. <br>
//!
//! $$
//! O_j = Encrypt(T_j), j = 1...n; C_j = P_j \xor O_j, j = 1...n-1; C'_n = P'_n \xor MSB_u(O_n);
//!
//! O_j = Encrypt(T_j), j = 1...n; P_j = C_j \xor O_j, j = 1...n-1; P'_n = C'_n \xor MSB_u(O_n);
//! $$
//!
//! 在CTR工作模式中, 每个$T_i$都能提前计算出来, 故加解密都可以并行. 不需要填充. <br>
//! <br>
//! 开启`parallel`特性时, 不少于[`PAR_MIN_BLOCKS`]个分组的可并行部分由`rayon`分块处理, 结果与串行处理相同. <br>
//! 任何一步出错时不向输出写入任何数据.

use crate::{BlockCipher, CipherError, Decrypt, Encrypt};
use std::fmt::{Display, Formatter};

mod padding;
pub use padding::{BlockPadding, EmptyPadding, Pkcs7Padding};

mod counter;
pub use counter::{Counter, IncCounter};

mod ecb;
pub use ecb::{AESEcb, DESEcb, ECB};

mod cbc;
pub use cbc::{AESCbc, DESCbc, CBC};

mod ctr;
pub use ctr::{AESCtr, DESCtr, CTR};

/// 并行处理的最少分组数
pub const PAR_MIN_BLOCKS: usize = 256;

/// 对`buf`按`n`字节分块依次调用`f(块序号, 块)`, 最后一块可能不足`n`字节
#[cfg(feature = "parallel")]
fn try_for_each_chunk<F>(buf: &mut [u8], n: usize, f: F) -> Result<(), CipherError>
where
    F: Fn(usize, &mut [u8]) -> Result<(), CipherError> + Sync + Send,
{
    use rayon::prelude::*;

    if buf.len() >= PAR_MIN_BLOCKS * n {
        buf.par_chunks_mut(n)
            .enumerate()
            .try_for_each(|(i, chunk)| f(i, chunk))
    } else {
        buf.chunks_mut(n)
            .enumerate()
            .try_for_each(|(i, chunk)| f(i, chunk))
    }
}

#[cfg(not(feature = "parallel"))]
fn try_for_each_chunk<F>(buf: &mut [u8], n: usize, f: F) -> Result<(), CipherError>
where
    F: Fn(usize, &mut [u8]) -> Result<(), CipherError> + Sync + Send,
{
    buf.chunks_mut(n)
        .enumerate()
        .try_for_each(|(i, chunk)| f(i, chunk))
}

fn check_aligned<const N: usize>(data: &[u8]) -> Result<(), CipherError> {
    if data.len() % N != 0 {
        Err(CipherError::InvalidBlockLength {
            target: N,
            real: data.len(),
        })
    } else {
        Ok(())
    }
}

/// 分组加密工作模式 <br>
///
/// ECB/CBC使用PKCS#7填充, CTR不填充. CBC/CTR需要一个分组长度的IV, ECB忽略IV.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    ECB,
    CBC,
    CTR,
}

impl Mode {
    pub const fn need_iv(&self) -> bool {
        !matches!(self, Mode::ECB)
    }

    pub const fn need_padding(&self) -> bool {
        !matches!(self, Mode::CTR)
    }

    fn iv<const N: usize>(&self, iv: Option<&[u8]>) -> Result<[u8; N], CipherError> {
        let iv = iv.ok_or(CipherError::MissingIV)?;
        utils::Block::to_arr::<N>(iv).ok_or(CipherError::InvalidIVLength {
            target: N,
            real: iv.len(),
        })
    }

    /// 以`cipher`在当前模式下加密`plaintext`, 返回密文(不含IV)
    pub fn encrypt<E, const N: usize>(
        &self,
        cipher: &E,
        iv: Option<&[u8]>,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CipherError>
    where
        E: BlockCipher<N> + Sync,
    {
        let mut ciphertext = Vec::with_capacity(plaintext.len() + N);
        match self {
            Mode::ECB => ECB::<Pkcs7Padding, _, N>::new(cipher).encrypt(plaintext, &mut ciphertext)?,
            Mode::CBC => CBC::<Pkcs7Padding, _, N>::new(cipher, self.iv(iv)?)
                .encrypt(plaintext, &mut ciphertext)?,
            Mode::CTR => CTR::<_, _, N>::new(cipher, IncCounter::<N>::full(self.iv(iv)?))
                .encrypt(plaintext, &mut ciphertext)?,
        }

        Ok(ciphertext)
    }

    /// 以`cipher`在当前模式下解密`ciphertext`(不含IV)
    pub fn decrypt<E, const N: usize>(
        &self,
        cipher: &E,
        iv: Option<&[u8]>,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, CipherError>
    where
        E: BlockCipher<N> + Sync,
    {
        let mut plaintext = Vec::with_capacity(ciphertext.len());
        match self {
            Mode::ECB => ECB::<Pkcs7Padding, _, N>::new(cipher).decrypt(ciphertext, &mut plaintext)?,
            Mode::CBC => CBC::<Pkcs7Padding, _, N>::new(cipher, self.iv(iv)?)
                .decrypt(ciphertext, &mut plaintext)?,
            Mode::CTR => CTR::<_, _, N>::new(cipher, IncCounter::<N>::full(self.iv(iv)?))
                .decrypt(ciphertext, &mut plaintext)?,
        }

        Ok(plaintext)
    }
}

impl Mode {
    /// 加密并组帧: CBC/CTR输出`IV || 密文`, ECB只输出密文
    pub fn seal<E, const N: usize>(
        &self,
        cipher: &E,
        iv: Option<&[u8]>,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CipherError>
    where
        E: BlockCipher<N> + Sync,
    {
        let ciphertext = self.encrypt::<E, N>(cipher, iv, plaintext)?;
        if !self.need_iv() {
            return Ok(ciphertext);
        }

        let iv = self.iv::<N>(iv)?;
        let mut framed = Vec::with_capacity(N + ciphertext.len());
        framed.extend_from_slice(&iv);
        framed.extend(ciphertext);
        Ok(framed)
    }

    /// 解析[`Mode::seal`]的输出并解密, CBC/CTR取前`N`个字节作为IV
    pub fn open<E, const N: usize>(
        &self,
        cipher: &E,
        framed: &[u8],
    ) -> Result<Vec<u8>, CipherError>
    where
        E: BlockCipher<N> + Sync,
    {
        if !self.need_iv() {
            return self.decrypt::<E, N>(cipher, None, framed);
        }

        if framed.len() < N {
            return Err(CipherError::InvalidIVLength {
                target: N,
                real: framed.len(),
            });
        }

        let (iv, ciphertext) = framed.split_at(N);
        self.decrypt::<E, N>(cipher, Some(iv), ciphertext)
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Mode::ECB => "ECB",
            Mode::CBC => "CBC",
            Mode::CTR => "CTR",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests;
