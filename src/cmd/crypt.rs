use std::io::Write;

use anyhow::Context;
use cipher::block_cipher::DES;
use cipher::{engine, Mode};
use clap::{ArgMatches, Args, Command, FromArgMatches};
use rand::{rngs::OsRng, RngCore};

use super::args::{CipherType, IOArgs, IVector, Key, KeyArgs, ModeType};
use super::config::BcConfig;
use super::Cmd;
use crate::error::BcError;
use crate::log_error;

#[derive(Args, Clone)]
pub struct CryptArgs {
    #[arg(value_name = "STRING")]
    #[arg(help = "the input message, it's a hex string when decrypting")]
    pub msg: Option<String>,

    #[arg(short, long, value_enum, default_value = "cbc")]
    pub mode: ModeType,

    #[arg(short, long, value_enum, default_value = "aes")]
    pub cipher: CipherType,

    #[command(flatten)]
    pub key: KeyArgs,

    #[arg(long, value_name = "HEX")]
    #[arg(help = "the initial vector, generate a random one when encrypting if not specified")]
    pub iv: Option<IVector>,

    #[command(flatten)]
    pub io: IOArgs,

    #[arg(short = 'x', long)]
    #[arg(help = "the ciphertext is hex encoded (encrypt output or decrypt input)")]
    pub hex: bool,
}

impl CryptArgs {
    /// `pipe`, `msg`, `ifile`三者有且只有一个作为输入
    fn read_data(&self, pipe: Option<&[u8]>, is_decrypt: bool) -> anyhow::Result<Vec<u8>> {
        let datasource =
            pipe.is_some() as u8 + self.io.is_have_ifile() as u8 + self.msg.is_some() as u8;
        if datasource > 1 {
            return Err(BcError::MultipleDataSource.into());
        }

        if let Some(msg) = self.msg.as_deref() {
            return if is_decrypt {
                Ok(msg.parse::<Key>()?.to_vec())
            } else {
                Ok(msg.as_bytes().to_vec())
            };
        }

        let data = match (pipe, self.io.read_all_data()?) {
            (Some(p), _) => p.to_vec(),
            (None, Some(d)) => d,
            (None, None) => return Err(BcError::NoDataSource.into()),
        };

        if is_decrypt && self.hex {
            let s = String::from_utf8(data).context("the hex ciphertext is not UTF-8 encoded")?;
            Ok(s.parse::<Key>()?.to_vec())
        } else {
            Ok(data)
        }
    }

    fn iv_or_random(&self, mode: Mode) -> Option<IVector> {
        match self.iv.as_ref() {
            Some(iv) => Some(iv.clone()),
            None if mode.need_iv() => {
                let mut iv = vec![0u8; self.cipher.block_size()];
                OsRng.fill_bytes(&mut iv);
                log::debug!("generate random IV");
                Some(IVector::new(iv))
            }
            None => None,
        }
    }

    pub fn encrypt(&self, pipe: Option<&[u8]>) -> anyhow::Result<Vec<u8>> {
        let (mode, key) = (Mode::from(self.mode), Key::try_from(&self.key)?);
        let data = self.read_data(pipe, false)?;
        let iv = self.iv_or_random(mode);
        let iv = iv.as_deref();

        let framed = match self.cipher {
            CipherType::AES => {
                let aes = engine::expand_key(&key)?;
                engine::seal(mode, &aes, iv, &data)?
            }
            CipherType::DES => {
                let des = DES::new(&key)?;
                mode.seal::<DES, { DES::BLOCK_SIZE }>(&des, iv, &data)?
            }
        };

        Ok(framed)
    }

    /// 输入为`IV || 密文`, 显式指定`--iv`时输入只有密文
    pub fn decrypt(&self, pipe: Option<&[u8]>) -> anyhow::Result<Vec<u8>> {
        let (mode, key) = (Mode::from(self.mode), Key::try_from(&self.key)?);
        let data = self.read_data(pipe, true)?;
        let iv = self.iv.as_deref();

        let plaintext = match (self.cipher, iv) {
            (CipherType::AES, None) => engine::open(mode, &engine::expand_key(&key)?, &data)?,
            (CipherType::AES, iv) => engine::decrypt(mode, &engine::expand_key(&key)?, iv, &data)?,
            (CipherType::DES, None) => {
                mode.open::<DES, { DES::BLOCK_SIZE }>(&DES::new(&key)?, &data)?
            }
            (CipherType::DES, iv) => {
                mode.decrypt::<DES, { DES::BLOCK_SIZE }>(&DES::new(&key)?, iv, &data)?
            }
        };

        Ok(plaintext)
    }

    fn write_data(&self, data: &[u8], is_hex: bool) -> anyhow::Result<()> {
        let mut writer = self
            .io
            .writer_with_default(BcConfig::config().io_buf_size)?;

        if is_hex {
            writeln!(writer, "{}", hex::encode(data))?;
        } else {
            writer.write_all(data)?;
        }
        writer.flush()?;

        match self.io.file_path() {
            Some(ofile) => log::info!("SUCCESS({}) {}", self.mode_name(), ofile.display()),
            None => log::debug!("SUCCESS({})", self.mode_name()),
        }
        Ok(())
    }

    fn mode_name(&self) -> String {
        format!("{:?}-{}", self.cipher, Mode::from(self.mode))
    }
}

pub struct EncCmd<'a> {
    pipe: Option<&'a [u8]>,
}

impl<'a> EncCmd<'a> {
    pub fn new(pipe: Option<&'a [u8]>) -> Self {
        Self { pipe }
    }
}

impl Cmd for EncCmd<'_> {
    const NAME: &'static str = "enc";

    fn cmd() -> Command {
        CryptArgs::augment_args(
            Command::new(Self::NAME).about("Encrypt(PIPE | STRING | ifile), output `IV || ciphertext`"),
        )
    }

    fn run(&self, m: &ArgMatches) {
        let res = log_error(
            CryptArgs::from_arg_matches(m)
                .map_err(anyhow::Error::from)
                .and_then(|args| {
                    let data = args.encrypt(self.pipe).context("encrypt failed")?;
                    args.write_data(&data, args.hex)
                }),
        );

        if res.is_none() {
            std::process::exit(1);
        }
    }
}

pub struct DecCmd<'a> {
    pipe: Option<&'a [u8]>,
}

impl<'a> DecCmd<'a> {
    pub fn new(pipe: Option<&'a [u8]>) -> Self {
        Self { pipe }
    }
}

impl Cmd for DecCmd<'_> {
    const NAME: &'static str = "dec";

    fn cmd() -> Command {
        CryptArgs::augment_args(
            Command::new(Self::NAME).about("Decrypt(PIPE | HEX STRING | ifile), input `IV || ciphertext`"),
        )
    }

    fn run(&self, m: &ArgMatches) {
        let res = log_error(
            CryptArgs::from_arg_matches(m)
                .map_err(anyhow::Error::from)
                .and_then(|args| {
                    let data = args.decrypt(self.pipe).context("decrypt failed")?;
                    args.write_data(&data, false)
                }),
        );

        if res.is_none() {
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CryptArgs, DecCmd, EncCmd};
    use crate::cmd::Cmd;
    use crate::error::BcError;
    use cipher::CipherError;
    use clap::FromArgMatches;

    fn enc_args(args: &[&str]) -> CryptArgs {
        let m = EncCmd::cmd()
            .try_get_matches_from(std::iter::once("enc").chain(args.iter().copied()))
            .unwrap();
        CryptArgs::from_arg_matches(&m).unwrap()
    }

    fn dec_args(args: &[&str]) -> CryptArgs {
        let m = DecCmd::cmd()
            .try_get_matches_from(std::iter::once("dec").chain(args.iter().copied()))
            .unwrap();
        CryptArgs::from_arg_matches(&m).unwrap()
    }

    const KEY: &str = "2b7e151628aed2a6abf7158809cf4f3c";

    #[test]
    fn crypt_known_answer() {
        let args = enc_args(&[
            "-m",
            "cbc",
            "-k",
            KEY,
            "--iv",
            "000102030405060708090a0b0c0d0e0f",
            "YELLOW SUBMARINE",
        ]);
        let framed = args.encrypt(None).unwrap();
        assert_eq!(
            hex::encode(&framed),
            "000102030405060708090a0b0c0d0e0f2d3c5a2c02ad94f8a037bf222e64b6b53ae26dddc9a43f758280a182f1b94e71"
        );

        let hex_ct = hex::encode(&framed);
        let args = dec_args(&["-m", "cbc", "-k", KEY, &hex_ct]);
        assert_eq!(args.decrypt(None).unwrap(), b"YELLOW SUBMARINE");

        // 显式IV时输入只有密文
        let args = dec_args(&[
            "-m",
            "cbc",
            "-k",
            KEY,
            "--iv",
            "000102030405060708090a0b0c0d0e0f",
            &hex_ct[32..],
        ]);
        assert_eq!(args.decrypt(None).unwrap(), b"YELLOW SUBMARINE");
    }

    #[test]
    fn crypt_random_iv() {
        for mode in ["cbc", "ctr"] {
            let args = enc_args(&["-m", mode, "-k", KEY, "hello"]);
            let (c1, c2) = (args.encrypt(None).unwrap(), args.encrypt(None).unwrap());
            assert_ne!(c1[..16], c2[..16], "{mode}");

            let args = dec_args(&["-m", mode, "-k", KEY, "-x"]);
            assert_eq!(args.decrypt(Some(hex::encode(&c1).as_bytes())).unwrap(), b"hello");
            assert_eq!(args.decrypt(Some(hex::encode(&c2).as_bytes())).unwrap(), b"hello");
        }

        let args = enc_args(&["-m", "ecb", "-k", KEY, "hello"]);
        assert_eq!(args.encrypt(None).unwrap().len(), 16);
    }

    #[test]
    fn crypt_des() {
        let args = enc_args(&[
            "-c",
            "des",
            "-m",
            "cbc",
            "-k",
            "0123456789abcdef",
            "--iv",
            "1234567890abcdef",
        ]);
        let framed = args.encrypt(Some(&b"Now is the time for all "[..])).unwrap();
        assert_eq!(
            hex::encode(&framed[..32]),
            "1234567890abcdefe5c7cdde872bf27c43e934008c389c0f683788499a7c05f6"
        );

        let args = dec_args(&["-c", "des", "-m", "cbc", "-k", "0123456789abcdef"]);
        assert_eq!(
            args.decrypt(Some(framed.as_slice())).unwrap(),
            b"Now is the time for all "
        );
    }

    #[test]
    fn crypt_errors() {
        let args = enc_args(&["-k", "00", "hi"]);
        let e = args.encrypt(None).unwrap_err();
        assert_eq!(
            e.downcast_ref::<CipherError>(),
            Some(&CipherError::InvalidKeyLength { real: 1 })
        );

        let args = enc_args(&["-k", KEY, "hi"]);
        let e = args.encrypt(Some(&b"pipe"[..])).unwrap_err();
        assert_eq!(
            e.downcast_ref::<BcError>(),
            Some(&BcError::MultipleDataSource)
        );

        let args = enc_args(&["-k", KEY]);
        let e = args.encrypt(None).unwrap_err();
        assert_eq!(e.downcast_ref::<BcError>(), Some(&BcError::NoDataSource));

        let args = dec_args(&["-m", "ctr", "-k", KEY, "0011"]);
        let e = args.decrypt(None).unwrap_err();
        assert_eq!(
            e.downcast_ref::<CipherError>(),
            Some(&CipherError::InvalidIVLength {
                target: 16,
                real: 2
            })
        );

        assert!(EncCmd::cmd()
            .try_get_matches_from(["enc", "hi"])
            .is_err());
        assert!(EncCmd::cmd()
            .try_get_matches_from(["enc", "-k", KEY, "--kfile", "k.bin", "hi"])
            .is_err());
    }
}
