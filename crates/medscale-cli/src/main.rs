use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use eyre::Result;
use tracing_subscriber::EnvFilter;

use medscale_cli::commands;
use medscale_cli::config::{self, CliConfig};
use medscale_core::store_keys;
use medscale_engine::session::AnswerChange;
use medscale_engine::workbench::Workbench;
use medscale_storage::kv::FileStore;
use medscale_storage::state::StateStore;

#[derive(Parser, Debug)]
#[command(
    name = "medscale",
    about = "Fill in clinical scales and see their score, risk tier, and interpretation",
    version
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory holding saved answers (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available scales
    Scales,
    /// Show a scale's sections, current answers, and result
    Show { id: Option<String> },
    /// Make a scale the active one
    Use { id: String },
    /// Choose an option in a single-choice section
    Select {
        id: String,
        field: String,
        value: String,
    },
    /// Turn a multi-select option on (or off with --off)
    Toggle {
        id: String,
        field: String,
        value: String,
        #[arg(long)]
        off: bool,
    },
    /// Type a value into a freeform field
    Enter { id: String, field: String, text: String },
    /// Clear a section's answer
    Clear { id: String, field: String },
    /// Restore a scale's default answers
    Reset { id: String },
    /// Print the current result
    Result { id: Option<String> },
    /// Print the result as copyable plain text
    Export { id: Option<String> },
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Write a config file with the current settings
    Init,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let config_path = match &cli.global.config {
        Some(path) => path.clone(),
        None => config::default_config_path()?,
    };
    let mut config = config::load_config(&config_path)?;
    if let Some(dir) = &cli.global.data_dir {
        config.data_dir = Some(dir.clone());
    }

    init_tracing(&config, cli.global.log_json);

    if let Command::Config { command } = &cli.command {
        return run_config(command, &config_path, &config);
    }

    medscale_scales::check_registry()?;
    let data_dir = config.resolved_data_dir()?;
    tracing::debug!(data_dir = %data_dir.display(), "opening answer store");
    let store = StateStore::new(FileStore::new(data_dir));
    let has_active = store.get_value(store_keys::ACTIVE_SCALE).is_some();
    let mut bench = Workbench::open(medscale_scales::all_scales(), store);
    if !has_active && let Some(id) = &config.default_scale {
        bench.activate(id)?;
    }

    let json = cli.global.json;
    let output = match cli.command {
        Command::Scales => commands::list_scales(&bench),
        Command::Show { id } => {
            let id = commands::scale_id(&bench, id.as_deref())?;
            commands::show(&bench, &id, json)?
        }
        Command::Use { id } => commands::activate(&mut bench, &id)?,
        Command::Select { id, field, value } => {
            commands::apply(&mut bench, &id, &AnswerChange::Select { field, value }, json)?
        }
        Command::Toggle {
            id,
            field,
            value,
            off,
        } => commands::apply(
            &mut bench,
            &id,
            &AnswerChange::Toggle {
                field,
                value,
                on: !off,
            },
            json,
        )?,
        Command::Enter { id, field, text } => {
            commands::apply(&mut bench, &id, &AnswerChange::Enter { field, text }, json)?
        }
        Command::Clear { id, field } => {
            commands::apply(&mut bench, &id, &AnswerChange::Clear { field }, json)?
        }
        Command::Reset { id } => commands::reset(&mut bench, &id, json)?,
        Command::Result { id } => {
            let id = commands::scale_id(&bench, id.as_deref())?;
            commands::result(&bench, &id, json)?
        }
        Command::Export { id } => {
            let id = commands::scale_id(&bench, id.as_deref())?;
            commands::export(&bench, &id)?
        }
        Command::Config { .. } => unreachable!("handled before the store is opened"),
    };

    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn run_config(command: &ConfigCommand, path: &std::path::Path, config: &CliConfig) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            let mut effective = config.clone();
            effective.data_dir = Some(config.resolved_data_dir()?);
            println!("# {}", path.display());
            println!("{}", serde_json::to_string_pretty(&effective)?);
        }
        ConfigCommand::Init => {
            if path.exists() {
                return Err(eyre::eyre!("config already exists at {}", path.display()));
            }
            let mut initial = config.clone();
            initial.data_dir = Some(config.resolved_data_dir()?);
            config::save_config(path, &initial)?;
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}

fn init_tracing(config: &CliConfig, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.log_filter.as_deref().unwrap_or("warn"))
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
