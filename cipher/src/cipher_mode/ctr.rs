use super::{try_for_each_chunk, Counter, IncCounter};
use crate::block_cipher::{AES, DES};
use crate::{BlockEncrypt, CipherError, Decrypt, Encrypt};
use utils::Block;
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

/// The Counter Mode(CTR) <br>
///
/// 给定计数器`C`, 其生成的计数值$T_i$每个都需要是相异的. 加解密是同一个运算, 只用到分组密码的加密方向. <br>
/// 输出与输入等长, 最后一个不完整分组只使用密钥流的前缀.
#[derive(Clone)]
pub struct CTR<C, E, const N: usize> {
    counter: C,
    cipher: E,
}

pub type AESCtr = CTR<IncCounter<16>, AES, 16>;
pub type DESCtr = CTR<IncCounter<8>, DES, 8>;

impl<C: Counter<N>, E, const N: usize> CTR<C, E, N> {
    pub fn new(cipher: E, counter: C) -> Self {
        Self { counter, cipher }
    }

    pub fn set_counter(&mut self, counter: C) {
        self.counter = counter;
    }

    pub fn counter(&self) -> &C {
        &self.counter
    }
}

#[cfg(feature = "sec-zeroize")]
impl<C: Zeroize, E: Zeroize, const N: usize> Zeroize for CTR<C, E, N> {
    fn zeroize(&mut self) {
        self.counter.zeroize();
        self.cipher.zeroize();
    }
}

impl<C, E, const N: usize> CTR<C, E, N>
where
    C: Counter<N> + Sync,
    E: BlockEncrypt<N> + Sync,
{
    // 调用者负责输出截断为`data.len()`
    fn crypt_inner(&self, data: &[u8], out: &mut Vec<u8>) -> Result<(), CipherError> {
        let blocks = data.len().div_ceil(N);
        self.counter.check(blocks)?;

        let mut buf = Block::from(data);
        try_for_each_chunk(&mut buf, N, |i, chunk| {
            let mut stream = self.cipher.encrypt_block(&self.counter.count(i)?);
            Block::xor(chunk, &stream);
            stream.fill(0);
            Ok(())
        })?;

        out.extend_from_slice(&buf);
        Ok(())
    }
}

impl<C, E, const N: usize> Encrypt for CTR<C, E, N>
where
    C: Counter<N> + Sync,
    E: BlockEncrypt<N> + Sync,
{
    fn encrypt(&self, plaintext: &[u8], ciphertext: &mut Vec<u8>) -> Result<(), CipherError> {
        self.crypt_inner(plaintext, ciphertext)
    }
}

impl<C, E, const N: usize> Decrypt for CTR<C, E, N>
where
    C: Counter<N> + Sync,
    E: BlockEncrypt<N> + Sync,
{
    fn decrypt(&self, ciphertext: &[u8], plaintext: &mut Vec<u8>) -> Result<(), CipherError> {
        self.crypt_inner(ciphertext, plaintext)
    }
}
