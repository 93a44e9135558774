use anyhow::{bail, Context, Result};

use vcs_emulator::{Cartridge, Console, VcsSettings};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(rom) = args.next() else {
        bail!("usage: vcs-emulator <rom> [frames]");
    };
    let frames = args
        .next()
        .map(|frames| frames.parse::<usize>())
        .transpose()
        .context("frames must be a positive number")?;

    let cartridge =
        Cartridge::load(&rom).with_context(|| format!("can't insert cartridge {rom}"))?;

    let mut console = Console::new(VcsSettings::default())?;
    console.load_cartridge(cartridge);
    console.run(frames)?;

    Ok(())
}
