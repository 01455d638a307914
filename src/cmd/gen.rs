use std::{fs::OpenOptions, io::Write, path::PathBuf};

use super::args::CipherType;
use super::Cmd;
use crate::log_error;
use clap::{builder::EnumValueParser, value_parser, Arg, ArgAction, ArgMatches, Command, ValueEnum};
use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroizing;

fn write_to_file_or_stdout(m: &ArgMatches, data: &[u8]) -> anyhow::Result<()> {
    match m.get_one::<PathBuf>("output") {
        Some(p) => {
            let mut f = OpenOptions::new().create_new(true).write(true).open(p)?;
            f.write_all(data)?;
            log::info!("SUCCESS {}", p.display());
        }
        None => {
            println!("{}", Zeroizing::new(hex::encode(data)).as_str());
        }
    }
    Ok(())
}

fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .action(ArgAction::Set)
        .value_parser(value_parser!(PathBuf))
        .required(false)
        .help("write the raw bytes to the file, print hex string to stdout if not specified")
}

fn random_bytes(len: usize) -> Zeroizing<Vec<u8>> {
    let mut buf = Zeroizing::new(vec![0u8; len]);
    OsRng.fill_bytes(&mut buf);
    buf
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KeySize {
    #[value(name = "128")]
    AES128,
    #[value(name = "192")]
    AES192,
    #[value(name = "256")]
    AES256,
    #[value(name = "des", help = "DES key, 64 bits with the parity bits")]
    DES,
}

impl KeySize {
    pub const fn bytes(&self) -> usize {
        match self {
            KeySize::AES128 => 16,
            KeySize::AES192 => 24,
            KeySize::AES256 => 32,
            KeySize::DES => 8,
        }
    }
}

#[derive(Default)]
pub struct KeyGenCmd;

impl Cmd for KeyGenCmd {
    const NAME: &'static str = "keygen";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("generate a random cipher key")
            .arg(
                Arg::new("size")
                    .short('s')
                    .long("size")
                    .action(ArgAction::Set)
                    .default_value("128")
                    .value_parser(EnumValueParser::<KeySize>::new())
                    .help("the key bits size"),
            )
            .arg(output_arg())
    }

    fn run(&self, m: &ArgMatches) {
        let size = m.get_one::<KeySize>("size").copied().unwrap_or(KeySize::AES128);
        let key = random_bytes(size.bytes());
        if log_error(write_to_file_or_stdout(m, &key)).is_none() {
            std::process::exit(1);
        }
    }
}

#[derive(Default)]
pub struct IvGenCmd;

impl Cmd for IvGenCmd {
    const NAME: &'static str = "ivgen";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .about("generate a random initial vector of the cipher block size")
            .arg(
                Arg::new("cipher")
                    .short('c')
                    .long("cipher")
                    .action(ArgAction::Set)
                    .default_value("aes")
                    .value_parser(EnumValueParser::<CipherType>::new()),
            )
            .arg(output_arg())
    }

    fn run(&self, m: &ArgMatches) {
        let cipher = m.get_one::<CipherType>("cipher").copied().unwrap_or(CipherType::AES);
        let iv = random_bytes(cipher.block_size());
        if log_error(write_to_file_or_stdout(m, &iv)).is_none() {
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{random_bytes, write_to_file_or_stdout, IvGenCmd, KeyGenCmd, KeySize};
    use crate::cmd::args::CipherType;
    use crate::cmd::Cmd;

    #[test]
    fn gen_args() {
        let m = KeyGenCmd::cmd()
            .try_get_matches_from(["keygen", "-s", "256"])
            .unwrap();
        assert_eq!(m.get_one::<KeySize>("size"), Some(&KeySize::AES256));

        let m = KeyGenCmd::cmd().try_get_matches_from(["keygen"]).unwrap();
        assert_eq!(m.get_one::<KeySize>("size").map(|s| s.bytes()), Some(16));
        assert!(KeyGenCmd::cmd()
            .try_get_matches_from(["keygen", "-s", "64"])
            .is_err());

        let m = IvGenCmd::cmd()
            .try_get_matches_from(["ivgen", "-c", "des"])
            .unwrap();
        assert_eq!(
            m.get_one::<CipherType>("cipher").map(|c| c.block_size()),
            Some(8)
        );
    }

    #[test]
    fn gen_output() {
        let (a, b) = (random_bytes(32), random_bytes(32));
        assert_eq!(a.len(), 32);
        assert_ne!(*a, *b);

        let path = std::env::temp_dir().join(format!("blockcrypt-keygen-{}", std::process::id()));
        let m = KeyGenCmd::cmd()
            .try_get_matches_from(["keygen", "-o", path.to_str().unwrap()])
            .unwrap();
        write_to_file_or_stdout(&m, &a).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), *a);
        // 不覆盖已有文件
        assert!(write_to_file_or_stdout(&m, &b).is_err());
        std::fs::remove_file(path).unwrap();
    }
}
