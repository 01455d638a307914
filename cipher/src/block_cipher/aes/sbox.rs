//! 字节代换表 <br>
//!
//! `SBOX[x] = A(inverse(x)) ⊕ 0x63`, 其中`A`为FIPS 197 5.1.1中的仿射变换. <br>
//! 两张表在编译期生成, 运行期只读.

use super::gf;

pub static SBOX: [u8; 256] = build_sbox();

pub static INV_SBOX: [u8; 256] = build_inv_sbox(&build_sbox());

#[inline]
const fn affine(b: u8) -> u8 {
    b ^ b.rotate_left(1) ^ b.rotate_left(2) ^ b.rotate_left(3) ^ b.rotate_left(4) ^ 0x63
}

pub const fn build_sbox() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = affine(gf::inverse(i as u8));
        i += 1;
    }
    table
}

/// `sbox`需为置换, 否则结果无意义
pub const fn build_inv_sbox(sbox: &[u8; 256]) -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[sbox[i] as usize] = i as u8;
        i += 1;
    }
    table
}

#[inline]
pub const fn substitute(b: u8, table: &[u8; 256]) -> u8 {
    table[b as usize]
}

#[cfg(test)]
mod tests {
    use super::{substitute, INV_SBOX, SBOX};

    #[test]
    fn sbox_values() {
        assert_eq!(SBOX[0x00], 0x63);
        assert_eq!(SBOX[0x01], 0x7c);
        assert_eq!(SBOX[0x53], 0xed);
        assert_eq!(SBOX[0xff], 0x16);
        assert_eq!(INV_SBOX[0x63], 0x00);
        assert_eq!(INV_SBOX[0x00], 0x52);
        assert_eq!(INV_SBOX[0xed], 0x53);
    }

    #[test]
    fn sbox_is_permutation() {
        let mut seen = [false; 256];
        for x in 0..=255u8 {
            let y = substitute(x, &SBOX);
            assert!(!seen[y as usize], "duplicate sbox output {y:#04x}");
            seen[y as usize] = true;
            assert_eq!(substitute(y, &INV_SBOX), x);
            // S盒没有不动点与反不动点
            assert_ne!(y, x);
            assert_ne!(y, !x);
        }
    }
}
