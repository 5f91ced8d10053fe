//! CLI command definitions and argument parsing.

use cadence_domain::{Category, CloneId};
use clap::{ArgAction, Parser, Subcommand};
use std::str::FromStr;

/// Cadence CLI - Blend voice clone DNA from several sources.
#[derive(Debug, Parser)]
#[command(name = "cadence")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Server URL, overriding the profile
    #[arg(long, global = true, env = "CADENCE_SERVER")]
    pub server: Option<String>,

    /// Log more (repeat for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List voice clones
    Clones(ClonesArgs),

    /// Show the DNA profile of one or more clones
    Dna(DnaArgs),

    /// Merge several clones into a new one
    Merge(MergeArgs),

    /// Manage configuration profiles
    Profile(ProfileArgs),

    /// Enter the interactive merge session
    Repl,
}

/// Arguments for the clones command.
#[derive(Debug, Parser)]
pub struct ClonesArgs {
    /// Include hidden clones
    #[arg(short, long)]
    pub all: bool,
}

/// Arguments for the dna command.
#[derive(Debug, Parser)]
pub struct DnaArgs {
    /// Clone IDs
    #[arg(required = true)]
    pub ids: Vec<String>,
}

/// Arguments for the merge command.
#[derive(Debug, Parser)]
pub struct MergeArgs {
    /// Name for the merged clone
    #[arg(short, long)]
    pub name: String,

    /// Source clone ID (repeat for each source)
    #[arg(short, long = "source", required = true)]
    pub sources: Vec<String>,

    /// Weight override (format: ID:category=VALUE)
    #[arg(short, long = "weight")]
    pub weights: Vec<WeightOverride>,

    /// Print the weight table without submitting
    #[arg(long)]
    pub dry_run: bool,
}

/// One `ID:category=VALUE` weight override.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightOverride {
    /// Source clone
    pub clone_id: CloneId,
    /// Category to set
    pub category: Category,
    /// Raw value; clamped when applied
    pub value: f64,
}

impl FromStr for WeightOverride {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let usage = || format!("expected ID:category=VALUE, got '{}'", s);

        let (id, rest) = s.split_once(':').ok_or_else(usage)?;
        let (category, value) = rest.split_once('=').ok_or_else(usage)?;

        let clone_id = CloneId::new(id.trim())?;
        let category = category.parse::<Category>()?;
        let value = value
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("invalid weight '{}'", value.trim()))?;

        Ok(Self {
            clone_id,
            category,
            value,
        })
    }
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// Server URL
        #[arg(short, long)]
        url: String,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_is_repl() {
        let cli = Cli::parse_from(["cadence"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_merge_command() {
        let cli = Cli::parse_from([
            "cadence",
            "merge",
            "--name",
            "Blend A",
            "--source",
            "c1",
            "-s",
            "c2",
            "--weight",
            "c1:tone=80",
            "-vv",
        ]);
        match cli.command {
            Some(Command::Merge(args)) => {
                assert_eq!(args.name, "Blend A");
                assert_eq!(args.sources, vec!["c1", "c2"]);
                assert_eq!(args.weights.len(), 1);
                assert_eq!(args.weights[0].category, Category::Tone);
                assert!(!args.dry_run);
            }
            _ => panic!("Expected Merge command"),
        }
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_merge_requires_source() {
        let result = Cli::try_parse_from(["cadence", "merge", "--name", "Blend"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_weight_override_parsing() {
        let parsed: WeightOverride = "c1:openings_and_closings=12.5".parse().unwrap();
        assert_eq!(parsed.clone_id.as_str(), "c1");
        assert_eq!(parsed.category, Category::OpeningsAndClosings);
        assert_eq!(parsed.value, 12.5);

        assert!("c1tone=80".parse::<WeightOverride>().is_err());
        assert!("c1:tone".parse::<WeightOverride>().is_err());
        assert!("c1:flavor=80".parse::<WeightOverride>().is_err());
        assert!("c1:tone=loud".parse::<WeightOverride>().is_err());
    }

    #[test]
    fn test_out_of_range_override_parses() {
        let parsed: WeightOverride = "c1:humor=150".parse().unwrap();
        assert_eq!(parsed.value, 150.0);
    }
}
