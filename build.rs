// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

fn build_cli() -> Command {
    Command::new("blsync")
        .version(env!("CARGO_PKG_VERSION"))
        .author("blsync Contributors")
        .about("Bring a Blockland installation up to date with the update server")
        .subcommand_required(false)
        .arg(
            Arg::new("profile_path")
                .short('p')
                .long("profile-path")
                .value_name("DIR")
                .help("Install to specified directory (default: ./Blockland)"),
        )
        .arg(
            Arg::new("manifest")
                .short('m')
                .long("manifest")
                .value_name("FILE")
                .conflicts_with("manifest_url")
                .help("Use manifest file instead of asking the update server"),
        )
        .arg(
            Arg::new("manifest_url")
                .long("manifest-url")
                .value_name("URL")
                .default_value("http://update.blockland.us/latestVersion.php")
                .help("Update server endpoint"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("List out of date files"),
        )
        .arg(
            Arg::new("ignore")
                .short('i')
                .long("ignore")
                .action(ArgAction::SetTrue)
                .help("Don't ask to confirm updates"),
        )
        .arg(
            Arg::new("check")
                .short('c')
                .long("check")
                .action(ArgAction::SetTrue)
                .help("Don't update, just check"),
        )
        .arg(
            Arg::new("checksum")
                .long("checksum")
                .value_parser(["sha1", "sha256"])
                .default_value("sha1")
                .help("Hash algorithm used by the manifest"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .action(ArgAction::SetTrue)
                .help("Exit with a failure status when any file could not be updated"),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(["bash", "zsh", "fish", "powershell", "elvish"])
                        .help("Shell type"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory
    let out_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).expect("Failed to create man directory");

    // Generate main man page
    let cmd = build_cli();
    let man = Man::new(cmd);
    let mut buffer = Vec::new();
    man.render(&mut buffer)
        .expect("Failed to render man page");

    let man_path = man_dir.join("blsync.1");
    fs::write(&man_path, buffer).expect("Failed to write man page");
}
