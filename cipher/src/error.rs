use thiserror::Error;

/// 加解密过程中的错误, 均为终止性错误: 出错时不产生任何输出.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CipherError {
    /// 不合法的密钥长度
    #[error("Invalid key size `{real}` bytes")]
    InvalidKeyLength { real: usize },

    /// 不合法分组大小
    #[error("Invalid block data size `{real}` not match to target size `{target}`")]
    InvalidBlockLength { target: usize, real: usize },

    /// 初始化向量长度需等于分组长度
    #[error("Invalid initial vector size `{real}` not match to block size `{target}`")]
    InvalidIVLength { target: usize, real: usize },

    /// CBC/CTR模式未给定初始化向量
    #[error("The initial vector is required by the cipher mode")]
    MissingIV,

    #[error("Invalid padding")]
    InvalidPadding,

    /// CTR计数值超出计数范围
    #[error("The counter is exhausted")]
    CounterExhausted,

    #[error("Invalid counter width `{bits}` bits, need to in the range `[1, {max}]`")]
    InvalidCounterWidth { bits: usize, max: usize },
}
