use super::{Mode, PAR_MIN_BLOCKS};
use crate::block_cipher::{AES, DES};
use crate::{BlockDecrypt, BlockEncrypt, CipherError};

fn h(s: &str) -> Vec<u8> {
    hex::decode(s).unwrap()
}

const KEY: &str = "2b7e151628aed2a6abf7158809cf4f3c";
const PT: &str = "6bc1bee22e409f96e93d7e117393172aae2d8a571e03ac9c9eb76fac45af8e5130c81c46a35ce411e5fbc1191a0a52eff69f2445df4f9b17ad2b417be66c3710";

fn message(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 + 7) as u8).collect()
}

#[test]
fn mode_known_answer() {
    let aes = AES::new(&h(KEY)).unwrap();
    let pt = h(PT);

    let ct = Mode::ECB.encrypt::<_, 16>(&aes, None, &pt).unwrap();
    assert_eq!(
        hex::encode(&ct[..64]),
        "3ad77bb40d7a3660a89ecaf32466ef97f5d3d58503b9699de785895a96fdbaaf43b1cd7f598ece23881b00e3ed0306887b0c785e27e8ad3f8223207104725dd4"
    );
    assert_eq!(ct.len(), 80);
    assert_eq!(Mode::ECB.decrypt::<_, 16>(&aes, None, &ct).unwrap(), pt);

    let iv = h("000102030405060708090a0b0c0d0e0f");
    let ct = Mode::CBC.encrypt::<_, 16>(&aes, Some(&iv[..]), &pt).unwrap();
    assert_eq!(
        hex::encode(&ct[..64]),
        "7649abac8119b246cee98e9b12e9197d5086cb9b507219ee95db113a917678b273bed6b8e3c1743b7116e69e222295163ff1caa1681fac09120eca307586e1a7"
    );
    assert_eq!(Mode::CBC.decrypt::<_, 16>(&aes, Some(&iv[..]), &ct).unwrap(), pt);

    let iv = h("f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff");
    let ct = Mode::CTR.encrypt::<_, 16>(&aes, Some(&iv[..]), &pt).unwrap();
    assert_eq!(
        hex::encode(&ct),
        "874d6191b620e3261bef6864990db6ce9806f66b7970fdff8617187bb9fffdff5ae4df3edbd5d35e5b4f09020db03eab1e031dda2fbe03d1792170a0f3009cee"
    );
    assert_eq!(Mode::CTR.decrypt::<_, 16>(&aes, Some(&iv[..]), &ct).unwrap(), pt);
}

#[test]
fn mode_iv_check() {
    let aes = AES::new(&[0u8; 16]).unwrap();

    for mode in [Mode::CBC, Mode::CTR] {
        assert!(mode.need_iv());
        assert_eq!(
            mode.encrypt::<_, 16>(&aes, None, b"abc"),
            Err(CipherError::MissingIV),
            "{mode}"
        );
        assert_eq!(
            mode.decrypt::<_, 16>(&aes, Some(&[0u8; 8][..]), &[0u8; 16]),
            Err(CipherError::InvalidIVLength {
                target: 16,
                real: 8
            }),
            "{mode}"
        );
    }

    // ECB忽略IV
    assert!(!Mode::ECB.need_iv());
    assert!(Mode::ECB.need_padding() && Mode::CBC.need_padding());
    assert!(!Mode::CTR.need_padding());
    assert_eq!(
        Mode::ECB.encrypt::<_, 16>(&aes, Some(&[1u8; 3][..]), b"abc"),
        Mode::ECB.encrypt::<_, 16>(&aes, None, b"abc"),
    );
}

#[test]
fn mode_output_length() {
    let aes = AES::new(&[0u8; 32]).unwrap();
    let iv = [9u8; 16];

    for len in [0usize, 1, 15, 16, 17, 100] {
        let pt = message(len);
        let padded = (len / 16 + 1) * 16;

        let ecb = Mode::ECB.encrypt::<_, 16>(&aes, None, &pt).unwrap();
        let cbc = Mode::CBC.encrypt::<_, 16>(&aes, Some(&iv[..]), &pt).unwrap();
        let ctr = Mode::CTR.encrypt::<_, 16>(&aes, Some(&iv[..]), &pt).unwrap();
        assert_eq!(ecb.len(), padded, "len {len}");
        assert_eq!(cbc.len(), padded, "len {len}");
        assert_eq!(ctr.len(), len, "len {len}");

        assert_eq!(Mode::ECB.decrypt::<_, 16>(&aes, None, &ecb).unwrap(), pt);
        assert_eq!(Mode::CBC.decrypt::<_, 16>(&aes, Some(&iv[..]), &cbc).unwrap(), pt);
        assert_eq!(Mode::CTR.decrypt::<_, 16>(&aes, Some(&iv[..]), &ctr).unwrap(), pt);
    }
}

#[test]
fn mode_des() {
    let des = DES::new(&h("0123456789abcdef")).unwrap();
    let iv = h("1234567890abcdef");
    let pt = b"Now is the time for all ";

    let ct = Mode::CBC.encrypt::<_, 8>(&des, Some(&iv[..]), pt).unwrap();
    assert_eq!(
        hex::encode(&ct[..24]),
        "e5c7cdde872bf27c43e934008c389c0f683788499a7c05f6"
    );
    assert_eq!(ct.len(), 32);
    assert_eq!(Mode::CBC.decrypt::<_, 8>(&des, Some(&iv[..]), &ct).unwrap(), pt);

    assert_eq!(
        Mode::CTR.encrypt::<_, 8>(&des, Some(&[0u8; 16][..]), pt),
        Err(CipherError::InvalidIVLength { target: 8, real: 16 })
    );
}

// 超过并行阈值时结果与逐块计算一致
#[test]
fn mode_large_input() {
    let aes = AES::new(&h(KEY)).unwrap();
    let iv: [u8; 16] = core::array::from_fn(|i| 0xf0 | i as u8);
    let pt = message(PAR_MIN_BLOCKS * 16 * 3 + 5);

    let ecb = Mode::ECB.encrypt::<_, 16>(&aes, None, &pt).unwrap();
    for (i, (c, p)) in ecb.chunks_exact(16).zip(pt.chunks_exact(16)).enumerate() {
        let p: [u8; 16] = p.try_into().unwrap();
        assert_eq!(c, aes.encrypt_block(&p), "block {i}");
    }
    assert_eq!(Mode::ECB.decrypt::<_, 16>(&aes, None, &ecb).unwrap(), pt);

    let cbc = Mode::CBC.encrypt::<_, 16>(&aes, Some(&iv[..]), &pt).unwrap();
    let mut prev = iv;
    for (i, c) in cbc.chunks_exact(16).take(PAR_MIN_BLOCKS * 3).enumerate() {
        let c: [u8; 16] = c.try_into().unwrap();
        let mut p = aes.decrypt_block(&c);
        p.iter_mut().zip(prev.iter()).for_each(|(a, b)| *a ^= b);
        assert_eq!(p, pt[(i * 16)..(i * 16 + 16)], "block {i}");
        prev = c;
    }
    assert_eq!(Mode::CBC.decrypt::<_, 16>(&aes, Some(&iv[..]), &cbc).unwrap(), pt);

    let ctr = Mode::CTR.encrypt::<_, 16>(&aes, Some(&iv[..]), &pt).unwrap();
    let start = u128::from_be_bytes(iv);
    for (i, (c, p)) in ctr.chunks(16).zip(pt.chunks(16)).enumerate() {
        let ks = aes.encrypt_block(&(start + i as u128).to_be_bytes());
        let expect = p.iter().zip(ks.iter()).map(|(a, b)| a ^ b).collect::<Vec<_>>();
        assert_eq!(c, expect, "block {i}");
    }
    assert_eq!(Mode::CTR.decrypt::<_, 16>(&aes, Some(&iv[..]), &ctr).unwrap(), pt);
}

#[test]
fn mode_bad_padding() {
    let aes = AES::new(&[0u8; 16]).unwrap();
    let iv = [0u8; 16];

    let mut ct = Mode::CBC
        .encrypt::<_, 16>(&aes, Some(&iv[..]), b"0123456789abcdefghij")
        .unwrap();
    assert_eq!(ct.len(), 32);
    // 改动前一个密文分组, 使最后一个分组解密后末字节为0
    ct[15] ^= 0x0c;
    assert_eq!(
        Mode::CBC.decrypt::<_, 16>(&aes, Some(&iv[..]), &ct),
        Err(CipherError::InvalidPadding)
    );
}

#[test]
fn mode_framing() {
    let aes = AES::new(&h(KEY)).unwrap();
    let iv = h("000102030405060708090a0b0c0d0e0f");

    let framed = Mode::CBC.seal::<_, 16>(&aes, Some(&iv[..]), &h(PT)).unwrap();
    assert_eq!(framed[..16], iv);
    assert_eq!(
        hex::encode(&framed[16..32]),
        "7649abac8119b246cee98e9b12e9197d"
    );
    assert_eq!(Mode::CBC.open::<_, 16>(&aes, &framed).unwrap(), h(PT));

    let framed = Mode::CTR.seal::<_, 16>(&aes, Some(&iv[..]), b"hi").unwrap();
    assert_eq!(framed.len(), 18);
    assert_eq!(Mode::CTR.open::<_, 16>(&aes, &framed).unwrap(), b"hi");

    let framed = Mode::ECB.seal::<_, 16>(&aes, Some(&iv[..]), b"hi").unwrap();
    assert_eq!(framed.len(), 16);
    assert_eq!(Mode::ECB.open::<_, 16>(&aes, &framed).unwrap(), b"hi");

    assert_eq!(
        Mode::CTR.open::<_, 16>(&aes, &[0u8; 15]),
        Err(CipherError::InvalidIVLength {
            target: 16,
            real: 15
        })
    );
    assert_eq!(
        Mode::CBC.seal::<_, 16>(&aes, None, b"hi"),
        Err(CipherError::MissingIV)
    );
}

mod prop {
    use super::super::Mode;
    use crate::block_cipher::AES;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn mode_round_trip(
            key in prop_oneof![
                prop::collection::vec(any::<u8>(), 16),
                prop::collection::vec(any::<u8>(), 24),
                prop::collection::vec(any::<u8>(), 32),
            ],
            iv in any::<[u8; 16]>(),
            pt in prop::collection::vec(any::<u8>(), 0..200),
        ) {
            let aes = AES::new(&key).unwrap();
            for mode in [Mode::ECB, Mode::CBC, Mode::CTR] {
                let ct = mode.encrypt::<_, 16>(&aes, Some(&iv[..]), &pt).unwrap();
                prop_assert_eq!(mode.decrypt::<_, 16>(&aes, Some(&iv[..]), &ct).unwrap(), pt.clone());
            }
        }
    }
}
