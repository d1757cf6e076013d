use anyhow::{Context, Result};
use clap::Parser;
use jjstats_icon::config::IconConfig;
use jjstats_icon::output::{self, OutputLayout};

#[derive(Parser)]
#[command(name = "generate-icon")]
#[command(about = "Generate the jjstats app icon (\"jj\" text on a squircle)", long_about = None)]
struct Cli {
    /// Generate foreground layer only (transparent background, for Icon Composer)
    #[arg(long)]
    foreground: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let project_root = std::env::current_dir().context("Failed to get current directory")?;
    let layout = OutputLayout::new(project_root);
    let config = IconConfig::default();

    if cli.foreground {
        output::generate_foreground(&layout, &config)?;
    } else {
        output::generate_full(&layout, &config)?;
    }

    Ok(())
}
