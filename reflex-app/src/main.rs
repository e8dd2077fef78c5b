mod app;
mod console;
mod controls;
mod devices;
mod store;

use std::path::PathBuf;

use clap::Parser;

pub use app::App;

#[derive(Parser, Debug, Clone)]
#[command(name = "reflex", about = "Headless stimulus presentation session")]
pub struct Args {
    /// Directory holding SavedTimeControls.json and the stimulus pool files
    #[arg(short, long, default_value = ".")]
    pub data_dir: PathBuf,

    /// Target frame rate of the presentation loop
    #[arg(long, default_value_t = 60.0)]
    pub fps: f64,

    /// Seed for stimulus selection and interval sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run on a virtual clock as fast as possible instead of in real time
    #[arg(long)]
    pub simulate: bool,

    /// Stop the session after this many seconds of session time
    #[arg(long)]
    pub max_seconds: Option<f64>,

    /// Length of every simulated audio clip, in seconds
    #[arg(long, default_value_t = 1.0)]
    pub clip_length: f64,

    /// Stay on the results screen after the last round instead of exiting
    #[arg(long)]
    pub hold: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let app = App::new(args)?;
    app.run()?;

    Ok(())
}
