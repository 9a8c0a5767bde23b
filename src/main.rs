use anyhow::Context;
use clap::{Parser, Subcommand};
use relm4::prelude::*;
use voicedial::config;
use voicedial::gui::app::AppModel;
use voicedial::gui::gauge::{Gauge, MeasureSpec};
use voicedial::icon;
use voicedial::sys::{runtime, server};

#[derive(Parser, Debug)]
#[command(name = "voicedial", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Light one more segment of the running dial
    Up,
    /// Dim the last lit segment of the running dial
    Down,
    /// Set how many segments are lit
    Set { count: u32 },
    /// Re-read the configuration file
    Reload,
    /// Write the default configuration file and print its path
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Up) => server::send_command("up"),
        Some(Commands::Down) => server::send_command("down"),
        Some(Commands::Set { count }) => server::send_command(&format!("set {}", count)),
        Some(Commands::Reload) => server::send_command("reload"),
        Some(Commands::InitConfig) => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
        None => run_dial(),
    }
}

fn run_dial() -> anyhow::Result<()> {
    let config = config::load_or_default();
    let mut gauge = Gauge::new(&config).context("Invalid dial configuration")?;
    gauge.measure(
        MeasureSpec::from_hint(config.width),
        MeasureSpec::from_hint(config.height),
    );
    let icon = icon::load_icon(&config.icon);

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.voicedial.VoiceDial");
    app.run::<AppModel>((gauge, icon, rx));
    Ok(())
}
