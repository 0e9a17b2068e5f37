//! Command dispatch

use std::io;
use std::path::Path;
use std::sync::Arc;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::services::{Report, SolverService};
use crate::cli::args::{Cli, Commands, ConfigCommands, InputArgs};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::infrastructure::{input_for, InfraError, InfraResult};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);

    match &cli.command {
        None => cmd_solve(settings, &InputArgs::default(), false),
        Some(Commands::Solve { input, show_set }) => cmd_solve(settings, input, *show_set),
        Some(Commands::Tree { input }) => cmd_tree(settings, input),
        Some(Commands::Config { command }) => cmd_config(&settings, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

#[instrument(skip(settings))]
fn cmd_solve(mut settings: Settings, input: &InputArgs, show_set: bool) -> CliResult<()> {
    input.apply(&mut settings);
    if show_set {
        settings.show_set = true;
    }

    let solver = SolverService::new(Arc::new(settings));
    let source = input_for(input.file.as_deref());
    let report = solver.solve(source.as_ref())?;
    output::info(&format_report(&report));
    Ok(())
}

/// The answer line, then the chosen ids when a selection was requested.
fn format_report(report: &Report) -> String {
    let mut text = report.value.to_string();
    if let Some(selection) = &report.selection {
        text.push('\n');
        text.push_str(&selection.iter().join(" "));
    }
    text
}

#[instrument(skip(settings))]
fn cmd_tree(mut settings: Settings, input: &InputArgs) -> CliResult<()> {
    input.apply(&mut settings);

    let solver = SolverService::new(Arc::new(settings));
    let source = input_for(input.file.as_deref());
    let rendered = solver.render(source.as_ref())?;
    print!("{}", rendered);
    Ok(())
}

fn cmd_config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            output::header("Config paths");
            match global_config_path() {
                Some(path) => {
                    let state = if path.exists() { "exists" } else { "not created" };
                    output::detail(&format!("global: {} ({})", path.display(), state));
                }
                None => output::detail(&"global: unavailable (no home directory)"),
            }
            Ok(())
        }
        ConfigCommands::Init { force } => {
            let path = global_config_path().ok_or_else(|| {
                CliError::Usage("cannot determine config directory".to_string())
            })?;
            if path.exists() && !force {
                return Err(CliError::Usage(format!(
                    "config already exists: {} (use --force to overwrite)",
                    path.display()
                )));
            }
            write_template(&path)?;
            output::action("Created", &path.display());
            Ok(())
        }
    }
}

fn write_template(path: &Path) -> InfraResult<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .map_err(|e| InfraError::io(format!("create {}", dir.display()), e))?;
    }
    std::fs::write(path, Settings::template())
        .map_err(|e| InfraError::io(format!("write {}", path.display()), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn report(value: i64, selection: Option<Vec<usize>>) -> Report {
        Report {
            value,
            vertices: 4,
            height: 4,
            selection,
        }
    }

    #[test]
    fn given_plain_report_when_formatting_then_single_integer_line() {
        assert_eq!(format_report(&report(10, None)), "10");
    }

    #[test]
    fn given_selection_when_formatting_then_ids_on_second_line() {
        let text = format_report(&report(10, Some(vec![1, 4])));

        assert_eq!(text, "10\n1 4");
    }

    #[test]
    fn given_empty_selection_when_formatting_then_empty_second_line() {
        assert_eq!(format_report(&report(0, Some(vec![]))), "0\n");
    }

    #[test]
    fn given_missing_directory_when_writing_template_then_creates_it() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("tree-mwis.toml");

        write_template(&path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), Settings::template());
    }
}
