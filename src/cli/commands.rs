//! Command dispatch

use std::io::{self, Write};
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Flag) => cmd_flag(cli, container),
        Some(Commands::Count { unflagged }) => cmd_count(cli, container, *unflagged),
        Some(Commands::Unmarked) => cmd_unmarked(cli, container),
        Some(Commands::Remove { names }) => cmd_remove(cli, container, names),
        Some(Commands::Cleanup) => cmd_cleanup(cli, container),
        Some(Commands::Tree) => cmd_tree(cli, container),
        Some(Commands::Config { command }) => cmd_config(container, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see --help".to_string(),
        )),
    }
}

fn data_file(cli: &Cli, container: &ServiceContainer) -> CliResult<PathBuf> {
    container.data_file(cli.data_file.clone()).ok_or_else(|| {
        CliError::Usage("no data file: pass -f/--data-file or set data_file in config".to_string())
    })
}

#[instrument(level = "debug", skip_all)]
fn cmd_flag(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    let path = data_file(cli, container)?;
    let report = container.analysis.analyze(&path)?;

    output::header(&format!("Profiles in {}", path.display()));
    output::action("of interest", &report.flagged);
    output::action("not of interest", &report.unflagged);
    if !report.unmarked.is_empty() {
        output::detail(&report.unmarked.iter().join("; "));
    }
    Ok(())
}

#[instrument(level = "debug", skip_all)]
fn cmd_count(cli: &Cli, container: &ServiceContainer, unflagged: bool) -> CliResult<()> {
    let path = data_file(cli, container)?;
    let db = container.analysis.load_flagged(&path)?;
    output::info(&db.matching_profile_count(!unflagged));
    Ok(())
}

#[instrument(level = "debug", skip_all)]
fn cmd_unmarked(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    let path = data_file(cli, container)?;
    let db = container.analysis.load_flagged(&path)?;
    for name in db.unmarked_people() {
        output::info(&name);
    }
    Ok(())
}

#[instrument(level = "debug", skip_all)]
fn cmd_remove(cli: &Cli, container: &ServiceContainer, names: &[String]) -> CliResult<()> {
    if let Some(bad) = names.iter().find(|name| !name.contains(", ")) {
        return Err(CliError::InvalidArgs(format!(
            "expected \"Last, First\", got {:?}",
            bad
        )));
    }
    let path = data_file(cli, container)?;
    let report = container
        .analysis
        .remove(&path, names, container.settings.auto_flag)?;

    for name in &report.removed {
        output::removed(name);
    }
    for name in &report.missing {
        output::failure(&format!("not found: {}", name));
    }
    output::success(&format!("{} remaining", report.remaining.len()));
    Ok(())
}

#[instrument(level = "debug", skip_all)]
fn cmd_cleanup(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    let path = data_file(cli, container)?;
    let report = container.analysis.cleanup(&path)?;

    output::header(&format!("Removed {} profiles", report.removed.len()));
    for name in &report.removed {
        output::removed(name);
    }
    output::header(&format!("Remaining {} profiles", report.remaining.len()));
    for name in &report.remaining {
        output::detail(name);
    }
    Ok(())
}

#[instrument(level = "debug", skip_all)]
fn cmd_tree(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    let path = data_file(cli, container)?;
    let db = if container.settings.auto_flag {
        container.analysis.load_flagged(&path)?
    } else {
        container.analysis.load(&path)?
    };

    if db.tree().is_empty() {
        output::warning("tree is empty");
        return Ok(());
    }
    debug!("tree depth: {}", db.tree().depth());

    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", db.tree().to_display_tree())
        .map_err(|e| InfraError::io("write tree to stdout", e))?;
    Ok(())
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(p) => output::action("global", &p.display()),
                None => output::failure("global: no config directory"),
            }
            let cwd = std::env::current_dir()
                .map_err(|e| InfraError::io("get current directory", e))?;
            output::action("local", &local_config_path(&cwd).display());
        }
        ConfigCommands::Template => {
            output::info(&Settings::template());
        }
    }
    Ok(())
}
