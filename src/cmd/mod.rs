use clap::{ArgMatches, Command};

pub trait Cmd {
    const NAME: &'static str;

    fn cmd() -> Command;

    fn run(&self, m: &ArgMatches);
}

pub mod args;

pub mod config;
pub use config::BcConfig;

mod crypt;
pub use crypt::{CryptArgs, DecCmd, EncCmd};

mod gen;
pub use gen::{IvGenCmd, KeyGenCmd, KeySize};
