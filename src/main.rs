use clap::Parser;
use relm4::prelude::*;
use roleta::carousel::LayoutKind;
use roleta::config;
use roleta::gui::{AppInit, AppModel};
use roleta::sys::runtime;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "roleta", version, about, long_about = None)]
struct Cli {
    /// Config file to use instead of the one in the user config directory
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Layout to use regardless of the config file ("static" or "responsive")
    #[arg(short, long)]
    layout: Option<LayoutKind>,

    /// Write the default config file (if missing), print its path and exit
    #[arg(long)]
    write_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => std::path::absolute(path)?,
        None => config::get_config_path()?,
    };

    if cli.write_config {
        config::write_default_config(&config_path)?;
        println!("{}", config_path.display());
        return Ok(());
    }

    let mut config = config::load_or_default(&config_path);
    if let Some(layout) = cli.layout {
        config.layout = layout;
    }

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    let handle = runtime::start_background_services(config_path.clone(), tx.clone())?;

    let app = RelmApp::new("org.roleta.Roleta").with_args(Vec::new());

    app.run::<AppModel>(AppInit {
        config,
        config_path,
        layout_override: cli.layout,
        runtime: handle,
        tx,
        rx,
    });
    Ok(())
}
