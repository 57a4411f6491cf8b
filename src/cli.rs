// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::focus::Mode;

#[derive(Parser, Debug, Clone)]
#[command(name = "focus-changer")]
#[command(about = "Headless camera focus changer simulation", long_about = None)]
pub struct Cli {
    /// Settings file (created with defaults if missing)
    #[arg(long, default_value = "focus_changer.json")]
    pub config: PathBuf,

    /// Override and persist the transition mode
    #[arg(long, value_enum)]
    pub mode: Option<Mode>,

    /// Number of rendered frames to simulate
    #[arg(long, default_value_t = 720)]
    pub frames: u32,

    /// Fixed simulation rate in Hz
    #[arg(long, default_value_t = 50.0)]
    pub hz: f32,
}
