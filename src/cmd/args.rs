use std::ops::Deref;
use std::str::FromStr;
use std::{
    fs::{File, OpenOptions},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use clap::{Args, ValueEnum};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::BcError;

#[derive(Args, Clone)]
#[group(required = true, multiple = false, id = "key_source")]
pub struct KeyArgs {
    #[arg(long, group = "key_source")]
    #[arg(help = "the key file path, the file content is the raw key bytes")]
    pub kfile: Option<PathBuf>,

    #[arg(short, long, group = "key_source", value_name = "HEX")]
    #[arg(help = "the key hex string")]
    pub key: Option<Key>,
}

/// 十六进制字符串解析得到的字节, 析构时清零
#[derive(Zeroize, ZeroizeOnDrop, Debug, Clone, PartialEq, Eq)]
pub struct Key {
    key: Vec<u8>,
}

pub type IVector = Key;

impl Key {
    pub const fn new(key: Vec<u8>) -> Self {
        Self { key }
    }

    pub fn len(&self) -> usize {
        self.key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }
}

impl From<Vec<u8>> for Key {
    fn from(value: Vec<u8>) -> Self {
        Self { key: value }
    }
}

impl FromStr for Key {
    type Err = BcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        hex::decode(s)
            .map(Key::new)
            .map_err(|e| BcError::InvalidHex(e.to_string()))
    }
}

impl Deref for Key {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.key.as_slice()
    }
}

impl AsRef<[u8]> for Key {
    fn as_ref(&self) -> &[u8] {
        &self.key
    }
}

impl TryFrom<&KeyArgs> for Key {
    type Error = anyhow::Error;

    fn try_from(value: &KeyArgs) -> Result<Self, Self::Error> {
        if let Some(f) = value.kfile.as_deref() {
            let key = std::fs::read(f)?;
            return Ok(Key { key });
        }

        if let Some(s) = value.key.as_ref() {
            return Ok(s.clone());
        }

        Err(BcError::NoKey.into())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CipherType {
    #[value(name = "aes", help = "AES-128/192/256, selected by the key length")]
    AES,
    #[value(name = "des", help = "DES, 8 bytes key")]
    DES,
}

impl CipherType {
    pub const fn block_size(&self) -> usize {
        match self {
            CipherType::AES => 16,
            CipherType::DES => 8,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeType {
    #[value(name = "ecb", help = "The Electronic Codebook Mode(NIST SP 800-38A)")]
    ECB,
    #[value(name = "cbc", help = "The Cipher Block Chaining Mode(NIST SP 800-38A)")]
    CBC,
    #[value(name = "ctr", help = "The Counter Mode(NIST SP 800-38A)")]
    CTR,
}

impl From<ModeType> for cipher::Mode {
    fn from(value: ModeType) -> Self {
        match value {
            ModeType::ECB => cipher::Mode::ECB,
            ModeType::CBC => cipher::Mode::CBC,
            ModeType::CTR => cipher::Mode::CTR,
        }
    }
}

#[derive(Args, Clone, Default)]
pub struct IOArgs {
    #[arg(short = 'f', long = "ifile")]
    #[arg(help = "the input file path")]
    pub ifile: Option<PathBuf>,

    #[arg(short, long)]
    #[arg(help = "the output file path, write to stdout if not specified")]
    pub ofile: Option<PathBuf>,

    #[arg(short, long)]
    #[arg(help = "truncate the output file if it exists")]
    pub replace: bool,
}

impl IOArgs {
    pub fn is_have_ifile(&self) -> bool {
        self.ifile.is_some()
    }

    pub fn read_all_data(&self) -> anyhow::Result<Option<Vec<u8>>> {
        match self.ifile.as_ref() {
            Some(f) => Ok(Some(std::fs::read(f)?)),
            None => Ok(None),
        }
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.ofile.as_deref()
    }

    pub fn writer(&self, buf_size: usize) -> anyhow::Result<Option<BufWriter<File>>> {
        let Some(x) = self.file_path() else {
            return Ok(None);
        };

        if let Some(dirname) = x.parent().filter(|d| !d.as_os_str().is_empty()) {
            if !dirname.exists() {
                std::fs::create_dir_all(dirname)?;
            }
        }

        let f = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(self.replace)
            .create_new(!self.replace)
            .open(x)?;
        Ok(Some(BufWriter::with_capacity(buf_size, f)))
    }

    pub fn writer_with_default(&self, buf_size: usize) -> anyhow::Result<Box<dyn Write>> {
        self.writer(buf_size).map(|x| match x {
            Some(w) => Box::new(w) as Box<dyn Write>,
            None => Box::new(BufWriter::new(std::io::stdout().lock())),
        })
    }
}
