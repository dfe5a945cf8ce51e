use clap::{Args, Parser, Subcommand};
use sentiment_shield_core::Category;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sentiment-shield")]
#[command(
    author,
    version,
    about = "Detect and hide emotionally negative content"
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (defaults to ./sentiment-shield.yaml when present)
    #[arg(short, long, global = true, env = "SENTIMENT_SHIELD_CONFIG")]
    pub config: Option<PathBuf>,

    /// State file holding settings and counters
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    /// YAML lexicon replacing the built-in vocabulary
    #[arg(long, global = true)]
    pub lexicon: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a single text
    Classify {
        /// Text to classify (read from stdin when absent)
        text: Option<String>,

        /// Author handle, checked against the allow-list
        #[arg(short, long, default_value = "")]
        author: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Scan content blocks given as JSON lines
    Scan {
        /// Input file, `-` for stdin
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Read host events from stdin and scan with debouncing until EOF
        #[arg(short, long)]
        watch: bool,
    },

    /// Show analysis counters
    Stats {
        /// Zero the counters
        #[arg(long)]
        reset: bool,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect or change settings
    Settings(SettingsArgs),
}

#[derive(Args, Debug)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub action: Option<SettingsAction>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum SettingsAction {
    /// Print the current settings as JSON
    Show,

    /// Hide content whose dominant category is CATEGORY
    Block { category: Category },

    /// Stop hiding CATEGORY
    Unblock { category: Category },

    /// Never hide content by USER
    AllowUser { user: String },

    /// Remove USER from the allow-list
    RemoveUser { user: String },

    /// Never hide content containing KEYWORD
    AllowKeyword { keyword: String },

    /// Remove KEYWORD from the allow-list
    RemoveKeyword { keyword: String },

    /// Turn the shield on
    Enable,

    /// Turn the shield off
    Disable,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_settings_block() {
        let cli = Cli::try_parse_from(["sentiment-shield", "settings", "block", "Fear"]).unwrap();
        match cli.command {
            Commands::Settings(SettingsArgs { action }) => {
                assert_eq!(
                    action,
                    Some(SettingsAction::Block {
                        category: Category::Fear
                    })
                );
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_unknown_category_rejected() {
        assert!(Cli::try_parse_from(["sentiment-shield", "settings", "block", "joy"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["sentiment-shield", "scan", "--watch", "--state", "/tmp/s.json"])
                .unwrap();
        assert_eq!(cli.state, Some(PathBuf::from("/tmp/s.json")));
        assert!(matches!(cli.command, Commands::Scan { watch: true, .. }));
    }
}
