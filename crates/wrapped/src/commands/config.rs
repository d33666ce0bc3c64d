use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::{Config, Overrides};

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();
    let settings = config.resolve(&Overrides::default());

    println!("{} {}", "Config file:".bold(), path.display());
    if !path.exists() {
        println!("{}", "  (not created yet, showing built-in defaults)".dimmed());
    }
    println!();
    println!("{}", "Effective settings:".bold());
    println!("  {:<18} {}", "progress", settings.shell.progress.name().cyan());
    println!(
        "  {:<18} {}",
        "start_slide",
        (settings.shell.start_slide + 1).to_string().cyan()
    );
    println!(
        "  {:<18} {}",
        "swipe_threshold",
        settings.shell.swipe_threshold.to_string().cyan()
    );
    match settings.cta_url {
        Some(url) => println!("  {:<18} {}", "cta_url", url.cyan()),
        None => println!("  {:<18} {}", "cta_url", "(none, call-to-action hidden)".dimmed()),
    }
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!("{} {} = {}", "Saved".green().bold(), key, value.cyan());
    println!("  {}", path.display().to_string().dimmed());
    Ok(())
}
