use blockcrypt::cmd::{BcConfig, Cmd, DecCmd, EncCmd, IvGenCmd, KeyGenCmd};
use clap::{Arg, ArgAction, Command};
use log::LevelFilter;
use std::io::Read;

fn main() {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let version = env!("BLOCKCRYPT_VERSION_INFO");
    let app = Command::new("blockcrypt")
        .version(version)
        .about("AES/DES block cipher with ECB, CBC and CTR modes")
        .arg(
            Arg::new("pipe")
                .long("pipe")
                .short('p')
                .action(ArgAction::SetTrue)
                .required(false)
                .help("read the input data from stdin"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .action(ArgAction::Set)
                .required(false)
                .help("the config file path"),
        )
        .subcommand(EncCmd::cmd())
        .subcommand(DecCmd::cmd())
        .subcommand(KeyGenCmd::cmd())
        .subcommand(IvGenCmd::cmd())
        .get_matches();

    let config = BcConfig::config_with_file(app.get_one::<String>("config").map(|s| s.as_str()));
    config.init_thread_pool();

    if let Some((s, m)) = app.subcommand() {
        let mut pdata = Vec::with_capacity(1024);
        if app.get_flag("pipe") {
            if let Err(e) = std::io::stdin().lock().read_to_end(&mut pdata) {
                log::error!("read from stdin failed: {e}");
                std::process::exit(1);
            }
        }
        let pipe = app.get_flag("pipe").then_some(pdata.as_slice());

        match s {
            EncCmd::NAME => EncCmd::new(pipe).run(m),
            DecCmd::NAME => DecCmd::new(pipe).run(m),
            KeyGenCmd::NAME => KeyGenCmd.run(m),
            IvGenCmd::NAME => IvGenCmd.run(m),
            name => {
                log::error!("unsupport for {}", name);
                std::process::exit(1);
            }
        }
    } else {
        println!(
            "{} {} ({})",
            env!("CARGO_PKG_NAME"),
            version,
            env!("BLOCKCRYPT_GIT_INFO")
        );
    }
}
