use clap::{Parser, Subcommand};
use portfolio_sync_common::Collection;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sync-images")]
#[command(about = "Keep the portfolio data file in sync with the image folder", long_about = None)]
pub struct Cli {
    /// Without a subcommand the interactive menu is shown
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Image folder (overrides config)
    #[arg(long, global = true)]
    pub images: Option<PathBuf>,

    /// Data file holding the record collections (overrides config)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Ignore-list file (overrides config)
    #[arg(long, global = true)]
    pub ignore_file: Option<PathBuf>,

    /// Keep changes in memory instead of writing the data file
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Offer every new image for a certificate or project record
    Scan,

    /// Replace the image of an existing record
    Replace {
        /// Collection to edit (certificates/projects)
        #[arg(short, long)]
        collection: Option<Collection>,
    },

    /// Show which images are referenced, ignored or new
    Status,

    /// Show or create the configuration
    Config {
        /// Print the effective configuration
        #[arg(long)]
        show: bool,

        /// Write the effective configuration to ./sync-images.json
        #[arg(long)]
        init: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_means_menu() {
        let cli = Cli::try_parse_from(["sync-images"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_replace_with_collection() {
        let cli = Cli::try_parse_from(["sync-images", "replace", "-c", "projects", "--dry-run"]).unwrap();
        match cli.command {
            Some(Commands::Replace { collection }) => assert_eq!(collection, Some(Collection::Projects)),
            _ => panic!("expected replace"),
        }
        assert!(cli.dry_run);
    }

    #[test]
    fn test_unknown_collection_rejected() {
        assert!(Cli::try_parse_from(["sync-images", "replace", "-c", "blog"]).is_err());
    }
}
