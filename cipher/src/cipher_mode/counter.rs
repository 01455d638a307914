use crate::CipherError;
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

/// CTR模式使用的计数器, 需要保证每个分组生成的计数值都是独一无二的 <br>
pub trait Counter<const N: usize> {
    /// 第`i`个分组使用的计数块
    fn count(&self, i: usize) -> Result<[u8; N], CipherError>;

    /// 处理`blocks`个分组前检查计数值是否足够, 不够时返回`CounterExhausted`
    fn check(&self, blocks: usize) -> Result<(), CipherError>;
}

/// 递增计数器 <br>
///
/// 计数块的低`bits`位按大端序解释为计数值, 从IV中的值开始每个分组加1, 其余高位保持IV原值. <br>
/// 计数值超出`2^bits - 1`时不回绕, 返回`CounterExhausted`. 调用者保证同一密钥下IV不重复使用.
#[derive(Clone, PartialEq, Eq)]
pub struct IncCounter<const N: usize> {
    iv: [u8; N],
    bits: usize,
    start: u128,
    max: u128,
}

impl<const N: usize> IncCounter<N> {
    /// 计数位数的上限
    pub const MAX_BITS: usize = if N * 8 < 128 { N * 8 } else { 128 };

    // 计数值所在的尾部字节数
    const TAIL: usize = Self::MAX_BITS >> 3;

    /// `bits`指定计数位数, 需满足`1 <= bits <= min(N * 8, 128)`
    pub fn new(iv: [u8; N], bits: usize) -> Result<Self, CipherError> {
        if bits == 0 || bits > Self::MAX_BITS {
            return Err(CipherError::InvalidCounterWidth {
                bits,
                max: Self::MAX_BITS,
            });
        }

        let max = u128::MAX >> (128 - bits);
        let mut tail = [0u8; 16];
        tail[(16 - Self::TAIL)..].copy_from_slice(&iv[(N - Self::TAIL)..]);
        let start = u128::from_be_bytes(tail) & max;

        Ok(Self {
            iv,
            bits,
            start,
            max,
        })
    }

    /// 整个分组(至多128位)都作为计数值
    pub fn full(iv: [u8; N]) -> Self {
        let (max, tail) = (u128::MAX >> (128 - Self::MAX_BITS), Self::TAIL);
        let mut buf = [0u8; 16];
        buf[(16 - tail)..].copy_from_slice(&iv[(N - tail)..]);

        Self {
            iv,
            bits: Self::MAX_BITS,
            start: u128::from_be_bytes(buf) & max,
            max,
        }
    }

    pub fn bits(&self) -> usize {
        self.bits
    }

    /// 从初始值开始还可以生成的计数块数量, 超过`u128`表示范围时为`None`
    pub fn remaining(&self) -> Option<u128> {
        (self.max - self.start).checked_add(1)
    }
}

impl<const N: usize> Counter<N> for IncCounter<N> {
    fn count(&self, i: usize) -> Result<[u8; N], CipherError> {
        let v = self
            .start
            .checked_add(i as u128)
            .filter(|v| *v <= self.max)
            .ok_or(CipherError::CounterExhausted)?;

        let mut block = self.iv;
        let tail = &mut block[(N - Self::TAIL)..];
        let mut x = [0u8; 16];
        x[(16 - Self::TAIL)..].copy_from_slice(tail);
        let x = (u128::from_be_bytes(x) & !self.max) | v;
        tail.copy_from_slice(&x.to_be_bytes()[(16 - Self::TAIL)..]);

        Ok(block)
    }

    fn check(&self, blocks: usize) -> Result<(), CipherError> {
        match self.remaining() {
            Some(r) if (blocks as u128) > r => Err(CipherError::CounterExhausted),
            _ => Ok(()),
        }
    }
}

impl<const N: usize> std::fmt::Debug for IncCounter<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IncCounter")
            .field("bits", &self.bits)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "sec-zeroize")]
impl<const N: usize> Zeroize for IncCounter<N> {
    fn zeroize(&mut self) {
        self.iv.zeroize();
        self.start.zeroize();
    }
}
