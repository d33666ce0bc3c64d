use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::config::{Config, Overrides};

#[derive(Parser)]
#[command(name = "wrapped")]
#[command(author, version, about)]
#[command(long_about = "An animated, story-style year-in-review slideshow.\n\n\
    Step through the slides with the arrow keys, a swipe or the on-screen buttons.\n\n\
    Examples:\n  \
    wrapped                          Launch the slideshow (fullscreen)\n  \
    wrapped --windowed --slide 5     Start on slide 5 in a window\n  \
    wrapped --progress bar           Show a progress bar instead of dots\n  \
    wrapped config set defaults.cta_url https://example.com")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch in a window instead of fullscreen
    #[arg(long, global = false)]
    pub windowed: bool,

    /// Start on a specific slide (1-indexed)
    #[arg(long, global = false)]
    pub slide: Option<usize>,

    /// Progress indicator style
    #[arg(long, global = false, value_parser = ["dots", "bar"])]
    pub progress: Option<String>,

    /// URL opened by the call-to-action on the last slide
    #[arg(long, global = false)]
    pub cta_url: Option<String>,

    /// Horizontal distance in pixels a swipe must exceed
    #[arg(long, global = false)]
    pub swipe_threshold: Option<f32>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.progress, defaults.start_slide, defaults.cta_url)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            progress: self.progress.clone(),
            start_slide: self.slide,
            swipe_threshold: self.swipe_threshold,
            cta_url: self.cta_url.clone(),
        }
    }

    /// Flags that only apply when launching the slideshow.
    fn launch_flags(&self) -> Vec<&'static str> {
        let mut flags = Vec::new();
        if self.windowed {
            flags.push("--windowed");
        }
        if self.slide.is_some() {
            flags.push("--slide");
        }
        if self.progress.is_some() {
            flags.push("--progress");
        }
        if self.cta_url.is_some() {
            flags.push("--cta-url");
        }
        if self.swipe_threshold.is_some() {
            flags.push("--swipe-threshold");
        }
        flags
    }

    fn check_flags(&self) -> anyhow::Result<()> {
        let flags = self.launch_flags();
        if self.command.is_some() && !flags.is_empty() {
            anyhow::bail!(
                "{} can only be used when launching the slideshow, not with a subcommand",
                flags.join(", ")
            );
        }
        Ok(())
    }

    pub fn run(self) -> anyhow::Result<()> {
        self.check_flags()?;
        match self.command {
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                println!("wrapped {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
            None => {
                let settings = Config::load_or_default().resolve(&self.overrides());
                crate::app::run(settings, self.windowed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::ProgressStyle;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_launch_flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "wrapped",
            "--windowed",
            "--slide",
            "3",
            "--progress",
            "bar",
            "--swipe-threshold",
            "80",
        ])
        .unwrap();
        assert!(cli.windowed);
        assert!(cli.check_flags().is_ok());
        let settings = Config::default().resolve(&cli.overrides());
        assert_eq!(settings.shell.start_slide, 2);
        assert_eq!(settings.shell.progress, ProgressStyle::Bar);
        assert_eq!(settings.shell.swipe_threshold, 80.0);
    }

    #[test]
    fn test_rejects_unknown_progress_style() {
        assert!(Cli::try_parse_from(["wrapped", "--progress", "ring"]).is_err());
    }

    #[test]
    fn test_slide_zero_starts_at_first_slide() {
        let cli = Cli::try_parse_from(["wrapped", "--slide", "0"]).unwrap();
        let settings = Config::default().resolve(&cli.overrides());
        assert_eq!(settings.shell.start_slide, 0);
    }

    #[test]
    fn test_global_flags_before_subcommand() {
        let cli = Cli::try_parse_from(["wrapped", "--no-color", "-q", "config", "show"]).unwrap();
        assert!(cli.no_color);
        assert!(cli.quiet);
        assert!(cli.check_flags().is_ok());

        let cli = Cli::try_parse_from(["wrapped", "config", "show", "-v"]).unwrap();
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_launch_flags_rejected_with_subcommand() {
        let cli =
            Cli::try_parse_from(["wrapped", "--windowed", "--slide", "2", "version"]).unwrap();
        let err = cli.check_flags().unwrap_err().to_string();
        assert!(err.contains("--windowed, --slide"));
    }

    #[test]
    fn test_verbosity_counts() {
        let cli = Cli::try_parse_from(["wrapped", "-vv", "config", "show"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                command: ConfigCommands::Show
            })
        ));
    }
}
