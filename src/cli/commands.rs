//! CLI commands and argument parsing

use crate::resources::{Attractions, Events, Resource, Venues};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Discovery API data loader
#[derive(Parser, Debug)]
#[command(name = "discovery-loader")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract pages from a resource into local JSON-lines files
    Extract {
        /// Resource to extract
        #[arg(short, long, value_enum, default_value = "events")]
        resource: ResourceKind,

        /// Output directory for page files
        #[arg(short, long, default_value = "data")]
        output: PathBuf,

        /// Checkpoint file holding the latest extracted timestamp
        #[arg(short, long, default_value = "data/latest_timestamp.json")]
        state: PathBuf,

        /// Start timestamp, overriding the checkpoint seed
        #[arg(long)]
        start_date: Option<String>,

        /// Page size requested from the API
        #[arg(long)]
        size: Option<u32>,

        /// Sort order. Ascending start time is required for deep pagination
        #[arg(long)]
        sort: Option<String>,

        /// Maximum pages to fetch (0 = unlimited)
        #[arg(long, default_value = "0")]
        max_pages: usize,
    },

    /// Test connection and credentials with a single size-1 request
    Check,
}

/// Resource selector for the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ResourceKind {
    /// The events endpoint
    Events,
    /// The venues endpoint
    Venues,
    /// The attractions endpoint
    Attractions,
}

impl ResourceKind {
    /// The resource this selector names
    pub fn resource(self) -> &'static dyn Resource {
        match self {
            Self::Events => &Events,
            Self::Venues => &Venues,
            Self::Attractions => &Attractions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_kind_maps_to_resource() {
        assert_eq!(ResourceKind::Events.resource().name(), "events");
        assert_eq!(ResourceKind::Venues.resource().name(), "venues");
        assert_eq!(ResourceKind::Attractions.resource().name(), "attractions");
    }

    #[test]
    fn test_cli_parses_extract_defaults() {
        let cli = Cli::try_parse_from(["discovery-loader", "extract"]).unwrap();
        match cli.command {
            Commands::Extract {
                resource,
                max_pages,
                start_date,
                ..
            } => {
                assert_eq!(resource, ResourceKind::Events);
                assert_eq!(max_pages, 0);
                assert!(start_date.is_none());
            }
            Commands::Check => panic!("expected extract"),
        }
    }

    #[test]
    fn test_cli_parses_resource_flag() {
        let cli = Cli::try_parse_from([
            "discovery-loader",
            "extract",
            "--resource",
            "venues",
            "--max-pages",
            "3",
        ])
        .unwrap();
        match cli.command {
            Commands::Extract {
                resource, max_pages, ..
            } => {
                assert_eq!(resource, ResourceKind::Venues);
                assert_eq!(max_pages, 3);
            }
            Commands::Check => panic!("expected extract"),
        }
    }
}
