use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use slicegen::config::StateFile;
use slicegen::logging::init_tracing;
use slicegen::{generate, Action, Resources, StateTree};

#[derive(Parser, Debug)]
#[command(name = "slicegen", version, about = "Derive actions and reducers from state slices")]
struct Cli {
    /// Log generation details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the action creators and action types of every slice
    Generate {
        /// State file (.toml or .json)
        file: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Apply actions to the default state and print the result
    Dispatch {
        /// State file (.toml or .json)
        file: PathBuf,

        /// Actions as JSON, e.g. '{"type":"SET_CAT","payload":"purr"}'
        actions: Vec<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(1)
        }
    }
}

fn run(command: Command) -> anyhow::Result<String> {
    match command {
        Command::Generate { file, format } => {
            let resources = load_resources(&file)?;
            match format {
                OutputFormat::Text => Ok(render_text(&resources)),
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&resources.describe())?),
            }
        }
        Command::Dispatch { file, actions } => {
            let resources = load_resources(&file)?;
            let mut tree = StateTree::new(&resources);
            for raw in &actions {
                let action: Action = serde_json::from_str(raw)
                    .with_context(|| format!("Invalid action '{}'", raw))?;
                tree.try_dispatch(&action)?;
            }
            Ok(serde_json::to_string_pretty(&tree.into_value())?)
        }
    }
}

fn load_resources(file: &Path) -> anyhow::Result<Resources> {
    let state_file = StateFile::load(file)?;
    Ok(generate(&state_file.to_state_map())?)
}

fn render_text(resources: &Resources) -> String {
    let width = resources
        .actions()
        .iter()
        .map(|creator| creator.name().len())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::new();
    for reducer in resources.reducers() {
        lines.push(format!("{} (default: {})", reducer.name(), reducer.default_value()));
        for creator in resources.actions().iter().filter(|c| c.slice() == reducer.name()) {
            lines.push(format!("  {:<width$}  {}", creator.name(), creator.action_type()));
        }
    }
    lines.join("\n")
}
