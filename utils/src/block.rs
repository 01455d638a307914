use std::ops::{Deref, DerefMut};
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

/// 字节缓冲, 开启`sec-zeroize-drop`时析构前清零. <br>
/// 同时提供定长分组与切片之间的转换.
#[derive(Default, Clone, Debug)]
pub struct Block {
    data: Vec<u8>,
}

impl Block {
    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn as_slice(&self) -> &[u8] {
        self.data.as_slice()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_arr<const N: usize>(&self) -> Option<&[u8; N]> {
        Self::as_arr_ref(self.data.as_slice())
    }

    pub fn as_arr_ref<const N: usize>(data: &[u8]) -> Option<&[u8; N]> {
        data.try_into().ok()
    }

    pub fn to_arr<const N: usize>(data: &[u8]) -> Option<[u8; N]> {
        data.try_into().ok()
    }

    /// Undefined: <br>
    /// 调用者保证`data.len() == N`, 通常来自`chunks_exact(N)`.
    pub const fn as_arr_ref_uncheck<const N: usize>(data: &[u8]) -> &[u8; N] {
        debug_assert!(data.len() == N);
        unsafe { &*(data.as_ptr() as *const [u8; N]) }
    }

    /// Undefined: <br>
    /// 调用者保证`data.len() == N`, 通常来自`chunks_exact_mut(N)`.
    pub fn as_arr_mut_uncheck<const N: usize>(data: &mut [u8]) -> &mut [u8; N] {
        debug_assert!(data.len() == N);
        unsafe { &mut *(data.as_mut_ptr() as *mut [u8; N]) }
    }

    /// Undefined: <br>
    /// 如果`data.len() != N`可能会造成不可知的错误, 如内存越界访问等.
    pub const fn to_arr_uncheck<const N: usize>(data: &[u8]) -> [u8; N] {
        debug_assert!(data.len() == N);
        unsafe { (data.as_ptr() as *const [u8; N]).read() }
    }

    /// `dst[i] ^= src[i]`, 长度取两者较小值
    #[inline]
    pub fn xor(dst: &mut [u8], src: &[u8]) {
        dst.iter_mut().zip(src.iter()).for_each(|(a, &b)| *a ^= b);
    }
}

impl AsMut<Vec<u8>> for Block {
    fn as_mut(&mut self) -> &mut Vec<u8> {
        &mut self.data
    }
}

impl Deref for Block {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.data.as_slice()
    }
}

impl DerefMut for Block {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.data.as_mut_slice()
    }
}

#[cfg(feature = "sec-zeroize")]
impl Zeroize for Block {
    fn zeroize(&mut self) {
        self.data.zeroize();
    }
}

#[cfg(feature = "sec-zeroize-drop")]
impl Drop for Block {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl From<&[u8]> for Block {
    fn from(value: &[u8]) -> Self {
        Self {
            data: value.to_vec(),
        }
    }
}

impl From<Vec<u8>> for Block {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl<A> Extend<A> for Block
where
    Vec<u8>: Extend<A>,
{
    fn extend<T: IntoIterator<Item = A>>(&mut self, iter: T) {
        self.data.extend(iter)
    }
}
