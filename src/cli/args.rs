//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};

use crate::config::Settings;
use crate::domain::{IndexBase, Recurrence};

/// Maximum-weight independent set on a weighted tree
///
/// Without a subcommand, reads the tree from stdin and prints the answer.
#[derive(Parser, Debug)]
#[command(name = "tree-mwis")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the maximum independent-set weight
    Solve {
        #[command(flatten)]
        input: InputArgs,

        /// Also print the chosen vertices
        #[arg(short, long)]
        show_set: bool,
    },

    /// Draw the rooted tree with DP values per vertex
    Tree {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Input and evaluation options shared by `solve` and `tree`.
#[derive(Args, Debug, Default)]
pub struct InputArgs {
    /// Tree file (default: stdin, `-` also reads stdin)
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Traversal root, in input numbering
    #[arg(short, long)]
    pub root: Option<usize>,

    /// Vertex ids in the input start at 0
    #[arg(short, long)]
    pub zero_based: bool,

    /// Skip tree validation (edge count, self-loops, duplicates, cycles)
    #[arg(long)]
    pub no_validate: bool,

    /// Recurrence used to fill the DP table
    #[arg(long, value_enum)]
    pub recurrence: Option<RecurrenceArg>,
}

impl InputArgs {
    /// Flags override whatever the config layers produced.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(root) = self.root {
            settings.root = Some(root);
        }
        if self.zero_based {
            settings.index_base = IndexBase::Zero;
        }
        if self.no_validate {
            settings.validate = false;
        }
        if let Some(recurrence) = self.recurrence {
            settings.recurrence = recurrence.into();
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecurrenceArg {
    /// Two values per vertex: best with and without it
    IncludeExclude,
    /// One value per vertex, combining children and grandchildren
    Grandchildren,
}

impl From<RecurrenceArg> for Recurrence {
    fn from(arg: RecurrenceArg) -> Self {
        match arg {
            RecurrenceArg::IncludeExclude => Recurrence::IncludeExclude,
            RecurrenceArg::Grandchildren => Recurrence::Grandchildren,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create global config template
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Show config paths
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn given_solve_flags_when_parsing_then_fills_input_args() {
        let cli = Cli::parse_from([
            "tree-mwis",
            "solve",
            "tree.txt",
            "--root",
            "3",
            "-z",
            "--no-validate",
            "--recurrence",
            "grandchildren",
            "-s",
        ]);

        match cli.command {
            Some(Commands::Solve { input, show_set }) => {
                assert_eq!(input.file, Some(PathBuf::from("tree.txt")));
                assert_eq!(input.root, Some(3));
                assert!(input.zero_based);
                assert!(input.no_validate);
                assert_eq!(input.recurrence, Some(RecurrenceArg::Grandchildren));
                assert!(show_set);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn given_repeated_debug_when_parsing_then_counts() {
        let cli = Cli::parse_from(["tree-mwis", "-ddd"]);
        assert_eq!(cli.debug, 3);
        assert!(cli.command.is_none());
    }

    #[test]
    fn given_flags_when_applying_then_override_settings() {
        let mut settings = Settings::default();
        let args = InputArgs {
            root: Some(2),
            zero_based: true,
            no_validate: true,
            recurrence: Some(RecurrenceArg::Grandchildren),
            ..Default::default()
        };

        args.apply(&mut settings);

        assert_eq!(settings.root, Some(2));
        assert_eq!(settings.index_base, IndexBase::Zero);
        assert!(!settings.validate);
        assert_eq!(settings.recurrence, Recurrence::Grandchildren);
    }
}
