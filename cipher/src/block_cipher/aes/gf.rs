//! GF(2⁸)上的运算 <br>
//!
//! 字节视为GF(2)上次数小于8的多项式, 乘法结果模不可约多项式x⁸ + x⁴ + x³ + x + 1. <br>
//! 加法即异或. 所有函数均为`const fn`, 以便在编译期生成S盒.

/// x⁸ + x⁴ + x³ + x + 1
pub const POLY: u16 = 0x11b;

/// 乘以x, 溢出0x100时异或约简多项式
#[inline]
pub const fn xtime(a: u8) -> u8 {
    (a << 1) ^ (((a >> 7) & 1) * ((POLY & 0xff) as u8))
}

/// 按`b`的每一位累加`a·xⁱ`, 分支只依赖循环计数
pub const fn multiply(a: u8, b: u8) -> u8 {
    let (mut a, mut b, mut p) = (a, b, 0u8);
    let mut i = 0;
    while i < 8 {
        p ^= a & (b & 1).wrapping_neg();
        a = xtime(a);
        b >>= 1;
        i += 1;
    }
    p
}

/// 乘法逆元`a²⁵⁴`, 约定`inverse(0) == 0`
pub const fn inverse(a: u8) -> u8 {
    // a^254 = a^2 · a^4 · ... · a^128
    let (mut sq, mut res) = (a, 1u8);
    let mut i = 1;
    while i < 8 {
        sq = multiply(sq, sq);
        res = multiply(res, sq);
        i += 1;
    }
    res
}

#[cfg(test)]
mod tests {
    use super::{inverse, multiply, xtime};

    #[test]
    fn gf_multiply() {
        // FIPS 197 4.2
        assert_eq!(multiply(0x57, 0x83), 0xc1);
        assert_eq!(multiply(0x57, 0x13), 0xfe);
        assert_eq!(xtime(0x57), 0xae);
        assert_eq!(xtime(0xae), 0x47);
        assert_eq!(xtime(0x47), 0x8e);
        assert_eq!(xtime(0x8e), 0x07);

        for a in 0..=255u8 {
            assert_eq!(multiply(a, 1), a);
            assert_eq!(multiply(a, 0), 0);
            assert_eq!(multiply(a, 2), xtime(a));
            assert_eq!(multiply(a, 0x1d), multiply(0x1d, a));
        }
    }

    #[test]
    fn gf_inverse() {
        assert_eq!(inverse(0), 0);
        assert_eq!(inverse(1), 1);
        assert_eq!(inverse(0x53), 0xca);

        for a in 1..=255u8 {
            assert_eq!(multiply(a, inverse(a)), 1, "inverse of {a:#04x} failed");
        }
    }
}
