use clap::{Command, CommandFactory};
use clap_complete::{Shell, generate_to};
use std::env;
use std::io::Error;
use std::path::PathBuf;

include!("src/args.rs");

const BIN_NAME: &str = "phylogenesy";

/// Completions are always written to `OUT_DIR`; fish users additionally get
/// them installed into their completion directory.
fn main() -> Result<(), Error> {
    println!("cargo:rerun-if-changed=src/args.rs");
    let mut cmd = Args::command();

    if let Some(out_dir) = env::var_os("OUT_DIR") {
        for shell in [Shell::Bash, Shell::Fish, Shell::Zsh] {
            generate_to(shell, &mut cmd, BIN_NAME, &out_dir)?;
        }
    }

    if let Some(dir) = fish_completions_dir() {
        install(Shell::Fish, &mut cmd, dir)?;
    }

    Ok(())
}

fn fish_completions_dir() -> Option<PathBuf> {
    let config = match env::var_os("XDG_CONFIG_HOME") {
        Some(config) => PathBuf::from(config),
        None => PathBuf::from(env::var_os("HOME")?).join(".config"),
    };
    let dir = config.join("fish").join("completions");
    dir.is_dir().then_some(dir)
}

fn install(shell: Shell, cmd: &mut Command, dir: PathBuf) -> Result<(), Error> {
    let path = generate_to(shell, cmd, BIN_NAME, dir)?;
    println!("cargo:warning={shell} completions installed at {}", path.display());
    Ok(())
}
