use super::round::{decrypt_round, encrypt_round, State};
use super::KeySchedule;
use crate::CipherError;
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

/// 第0轮只做AddRoundKey, 最后一轮不做MixColumns
fn encrypt_block<const R: usize>(schedule: &KeySchedule<R>, data: &[u8; 16]) -> [u8; 16] {
    let nr = schedule.rounds();
    let mut state = State::from_block(data);
    state.add_round_key(schedule.round_key(0));

    for round in 1..nr {
        state = encrypt_round(state, schedule.round_key(round), false);
    }

    encrypt_round(state, schedule.round_key(nr), true).to_block()
}

/// 轮密钥逆序使用
fn decrypt_block<const R: usize>(schedule: &KeySchedule<R>, data: &[u8; 16]) -> [u8; 16] {
    let nr = schedule.rounds();
    let mut state = State::from_block(data);
    state.add_round_key(schedule.round_key(nr));

    for round in (1..nr).rev() {
        state = decrypt_round(state, schedule.round_key(round), false);
    }

    decrypt_round(state, schedule.round_key(0), true).to_block()
}

macro_rules! impl_aes {
    (
        $NAME: ident,
        $KEY_BITS: literal,
        $NR: literal
    ) => {
        #[derive(Clone, PartialEq, Eq, Debug)]
        pub struct $NAME {
            schedule: KeySchedule<{ $NR + 1 }>,
        }

        impl $NAME {
            // 密钥位长度
            const KEY_BITS: usize = $KEY_BITS;
            pub const KEY_SIZE: usize = Self::KEY_BITS / 8;
            // 加密轮数
            pub const NR: usize = $NR;
            pub const BLOCK_SIZE: usize = 16;

            pub fn new(key: [u8; $KEY_BITS / 8]) -> Self {
                Self {
                    schedule: KeySchedule::expand_uncheck(&key),
                }
            }

            pub fn try_from_slice(key: &[u8]) -> Result<Self, CipherError> {
                KeySchedule::expand(key).map(|schedule| Self { schedule })
            }

            pub fn schedule(&self) -> &KeySchedule<{ $NR + 1 }> {
                &self.schedule
            }

            pub(super) fn encrypt_block_inner(&self, data: &[u8; 16]) -> [u8; 16] {
                encrypt_block(&self.schedule, data)
            }

            pub(super) fn decrypt_block_inner(&self, data: &[u8; 16]) -> [u8; 16] {
                decrypt_block(&self.schedule, data)
            }
        }

        #[cfg(feature = "sec-zeroize")]
        impl Zeroize for $NAME {
            fn zeroize(&mut self) {
                self.schedule.zeroize();
            }
        }
    };
}

impl_aes!(AES128, 128, 10);
impl_aes!(AES192, 192, 12);
impl_aes!(AES256, 256, 14);
