include!("src/config/cli.rs");

use std::{error::Error, fs};

use clap::{Command as ClapCommand, CommandFactory};
use clap_complete::{
    Shell::{Bash, Fish, Zsh},
    generate_to,
};
use clap_mangen::Man;

static NAME: &str = "fieldkit";

fn target_dir(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("Parent path for CARGO_MANIFEST_DIR to exist")
        .join("target")
        .join(name)
}

fn generate_man_pages(cmd: ClapCommand) -> Result<(), Box<dyn Error>> {
    let out = target_dir("man");
    let mut buffer = Vec::default();

    Man::new(cmd).render(&mut buffer)?;
    fs::create_dir_all(&out)?;
    fs::write(out.join(NAME.to_owned() + ".1"), buffer)?;
    Ok(())
}

fn generate_shell_completions(mut cmd: ClapCommand) -> Result<(), Box<dyn Error>> {
    let out = target_dir("completions");

    fs::create_dir_all(&out)?;
    for shell in [Bash, Fish, Zsh] {
        generate_to(shell, &mut cmd, NAME, &out)?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=src/config/cli.rs");

    let mut cmd = Args::command();
    cmd.set_bin_name(NAME);

    generate_man_pages(cmd.clone())?;
    generate_shell_completions(cmd)?;

    Ok(())
}
