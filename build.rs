use chrono::{DateTime, Local};
use std::{process::Command, time::SystemTime};

fn exe_cmd(cmd: &mut Command) -> anyhow::Result<String> {
    let output = cmd.output()?;

    anyhow::ensure!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr).trim()
    );
    Ok(String::from_utf8(output.stdout)?.trim().to_string())
}

fn git_info(args: &[&str]) -> String {
    match exe_cmd(Command::new("git").args(args)) {
        Ok(s) => s,
        Err(e) => {
            if std::env::var("IGNORE_CMD_ERR").is_err() {
                println!("cargo:warning=git {} failed: {e}", args.join(" "));
            }
            "unknown".to_string()
        }
    }
}

fn main() {
    let mut git_commit_hash = git_info(&["log", "-n", "1", "--pretty=format:%H"]);
    git_commit_hash.truncate(8);
    let git_branch = git_info(&["branch", "--show-current"]);

    println!(
        "cargo:rustc-env=BLOCKCRYPT_VERSION_INFO={}-{}",
        env!("CARGO_PKG_VERSION"),
        DateTime::<Local>::from(SystemTime::now()).format("%Y/%m/%d-%H:%M:%S:%Z")
    );

    println!(
        "cargo:rustc-env=BLOCKCRYPT_GIT_INFO={}-{}",
        git_branch, git_commit_hash
    );
    println!("cargo:rerun-if-changed=build.rs");
}
