//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for csvcount.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// csvcount - Count rows of CSV files matching a set of filters
#[derive(Parser, Debug)]
#[command(name = "csvcount")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Directory holding the input files (default: from config)
    #[arg(long, global = true, value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Filter specification file (default: from config)
    #[arg(long = "filters", global = true, value_name = "FILE")]
    pub filter_file: Option<PathBuf>,

    /// Results file to write (default: from config)
    #[arg(long = "results", global = true, value_name = "FILE")]
    pub results_file: Option<PathBuf>,

    /// Error log file to write (default: from config)
    #[arg(long = "errors", global = true, value_name = "FILE")]
    pub error_file: Option<PathBuf>,

    /// Compare OR-set values without regard to case
    #[arg(long, global = true)]
    pub ignore_case: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the input files that will be analysed
    Files,

    /// Show the filter groups or write the sample filter file
    Filters {
        #[command(subcommand)]
        command: Option<FiltersCommands>,
    },

    /// Count matching rows and write the results and error files
    #[command(alias = "run")]
    Analyse,

    /// View and edit configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Filters subcommands
#[derive(Subcommand, Debug)]
pub enum FiltersCommands {
    /// List filter groups and their conditions
    List,

    /// Write the sample filter file
    Sample,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. paths.input_dir)
        key: String,

        /// Configuration value
        value: String,
    },

    /// Restore the default configuration
    Reset,

    /// Print config file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_command() {
        let cli = Cli::parse_from(["csvcount"]);
        assert!(cli.command.is_none());
        assert!(!cli.yes);
    }

    #[test]
    fn test_analyse_alias() {
        let cli = Cli::parse_from(["csvcount", "run"]);
        assert!(matches!(cli.command, Some(Commands::Analyse)));
    }

    #[test]
    fn test_global_path_overrides() {
        let cli = Cli::parse_from([
            "csvcount",
            "analyse",
            "--input-dir",
            "data",
            "--filters",
            "my_filters.csv",
            "--results",
            "out.csv",
            "--errors",
            "err.csv",
            "--ignore-case",
            "-y",
        ]);
        assert_eq!(cli.input_dir, Some(PathBuf::from("data")));
        assert_eq!(cli.filter_file, Some(PathBuf::from("my_filters.csv")));
        assert_eq!(cli.results_file, Some(PathBuf::from("out.csv")));
        assert_eq!(cli.error_file, Some(PathBuf::from("err.csv")));
        assert!(cli.ignore_case);
        assert!(cli.yes);
    }

    #[test]
    fn test_filters_subcommands() {
        let cli = Cli::parse_from(["csvcount", "filters"]);
        assert!(matches!(cli.command, Some(Commands::Filters { command: None })));

        let cli = Cli::parse_from(["csvcount", "filters", "sample"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Filters {
                command: Some(FiltersCommands::Sample)
            })
        ));
    }

    #[test]
    fn test_config_subcommands() {
        let cli = Cli::parse_from(["csvcount", "config", "set", "paths.input_dir", "data"]);
        if let Some(Commands::Config {
            command: Some(ConfigCommands::Set { key, value }),
        }) = cli.command
        {
            assert_eq!(key, "paths.input_dir");
            assert_eq!(value, "data");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn test_completions() {
        let cli = Cli::parse_from(["csvcount", "completions", "fish"]);
        if let Some(Commands::Completions { shell }) = cli.command {
            assert!(matches!(shell, Shell::Fish));
        } else {
            panic!("Expected Completions command");
        }
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["csvcount", "-q", "-v", "files"]).is_err());
    }
}
