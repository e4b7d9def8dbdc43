// Command-line shell for the tools
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use engine::calculators::{self, parse_number_text};
use engine::catalog;
use engine::config::EngineSettings;
use engine::EngineError;
use engine::countdown::{self, CountdownStore, FileStorage};
use engine::json::{self, SampleKind};
use engine::services::{self, Osc52Clipboard};
use shared::models::{
    CalculationMode, Countdown, CountdownUpdate, JsonFormatOptions, JsonViewMode, UrlMode,
};
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tools")]
#[command(about = "Countdown timers, percentage calculator, JSON viewer and URL encoder")]
#[command(version)]
struct Cli {
    /// Path to a JSON settings file (falls back to $TOOLS_CONFIG)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Also place the result on the clipboard
    #[arg(long, global = true)]
    copy: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available tools
    List,
    /// Fuzzy-search the tool catalog
    Search { query: String },
    /// Percentage calculator
    Percent {
        #[arg(value_parser = parse_mode)]
        mode: CalculationMode,
        #[arg(allow_hyphen_values = true)]
        first: String,
        #[arg(allow_hyphen_values = true)]
        second: String,
        /// Percentage change decreases instead of increasing
        #[arg(long)]
        decrease: bool,
    },
    /// JSON viewer / formatter
    Json(JsonArgs),
    /// URL encoder / decoder
    Url {
        #[arg(value_enum)]
        mode: UrlModeArg,
        text: String,
    },
    /// Countdown timers
    Countdown {
        #[command(subcommand)]
        action: CountdownCommand,
    },
}

#[derive(Args, Debug)]
struct JsonArgs {
    #[arg(value_enum)]
    action: JsonAction,
    /// Read input from a file instead of stdin
    #[arg(short, long, conflicts_with = "sample")]
    file: Option<PathBuf>,
    /// Use a built-in sample document (simple or complex)
    #[arg(long)]
    sample: Option<SampleKind>,
    #[arg(long)]
    indent: Option<usize>,
    #[arg(long)]
    sort_keys: bool,
    /// Save formatted/minified output under its download name
    #[arg(long)]
    download: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum JsonAction {
    Validate,
    Format,
    Minify,
    Stats,
    Tree,
    /// Re-indent the input if it is JSON, otherwise echo it unchanged
    Paste,
    /// Escape the input for display inside a JSON string
    Escape,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum UrlModeArg {
    Encode,
    Decode,
}

impl From<UrlModeArg> for UrlMode {
    fn from(mode: UrlModeArg) -> Self {
        match mode {
            UrlModeArg::Encode => UrlMode::Encode,
            UrlModeArg::Decode => UrlMode::Decode,
        }
    }
}

#[derive(Subcommand, Debug)]
enum CountdownCommand {
    List,
    Add {
        name: String,
        /// Target date, e.g. 2030-01-01T09:00 or an RFC 3339 timestamp
        target: String,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        target: Option<String>,
    },
    Delete { id: String },
    /// Refresh remaining time until interrupted
    Watch {
        /// Stop after this many refreshes
        #[arg(long)]
        ticks: Option<u64>,
    },
}

fn parse_mode(s: &str) -> std::result::Result<CalculationMode, String> {
    s.parse()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = EngineSettings::resolve(cli.config.as_deref()).context("loading settings")?;
    init_tracing(&settings.log_level);
    tracing::debug!(?settings, "Settings resolved");

    let output = match run(cli.command, &settings).await {
        Ok(output) => output,
        Err(err) => match err.downcast_ref::<EngineError>() {
            // Rejected input and full lists are reported without the error chain.
            Some(engine_err) if engine_err.is_user_facing() => {
                eprintln!("{}", engine_err);
                std::process::exit(1);
            }
            _ => return Err(err),
        },
    };
    if let Some(text) = output {
        println!("{}", text);
        if cli.copy {
            services::copy_or_log(&mut Osc52Clipboard::stderr(), &text);
        }
    }
    Ok(())
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(command: Command, settings: &EngineSettings) -> Result<Option<String>> {
    match command {
        Command::List => Ok(Some(render_tools(&catalog::search("")))),
        Command::Search { query } => {
            let hits = catalog::search(&query);
            if hits.is_empty() {
                bail!("No tool matches '{}'", query);
            }
            Ok(Some(render_tools(&hits)))
        }
        Command::Percent { mode, first, second, decrease } => {
            percent(mode, &first, &second, !decrease).map(Some)
        }
        Command::Json(args) => json_command(args, settings).map(Some),
        Command::Url { mode, text } => {
            let processed = engine::url::process(&text, mode.into());
            match processed.error {
                Some(error) => bail!(error),
                None => Ok(Some(processed.result)),
            }
        }
        Command::Countdown { action } => {
            let mut store = CountdownStore::new(FileStorage::new(&settings.storage_path));
            countdown_command(action, &mut store, settings).await
        }
    }
}

fn render_tools(tools: &[&catalog::ToolDefinition]) -> String {
    tools
        .iter()
        .map(|tool| format!("{:<22} {}\n{:<22} {}", tool.id, tool.name, "", tool.description))
        .collect::<Vec<_>>()
        .join("\n")
}

fn percent(mode: CalculationMode, first: &str, second: &str, is_increase: bool) -> Result<String> {
    // Text is parsed here; the calculator labels any rejected operand.
    let first = parse_number_text(first);
    let second = parse_number_text(second);
    let result = calculators::calculate(mode, first, second, is_increase);
    match result.error {
        Some(error) => bail!(error),
        None => Ok(result.formatted),
    }
}

fn json_command(args: JsonArgs, settings: &EngineSettings) -> Result<String> {
    let text = match (&args.sample, &args.file) {
        (Some(kind), _) => serde_json::to_string_pretty(&json::sample(*kind))?,
        (None, Some(path)) => services::import_text(path)?,
        (None, None) => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer).context("reading stdin")?;
            buffer
        }
    };

    // Paste and escape work on raw text, so they run before validation.
    let indent = args.indent.unwrap_or(settings.json_indent);
    let view = match args.action {
        JsonAction::Paste => return Ok(json::reformat_if_json(&text, indent)),
        JsonAction::Escape => return Ok(json::escape_json_string(&text)),
        JsonAction::Validate | JsonAction::Stats => None,
        JsonAction::Format => Some(JsonViewMode::Formatted),
        JsonAction::Minify => Some(JsonViewMode::Minified),
        JsonAction::Tree => Some(JsonViewMode::Tree),
    };

    let validation = json::validate(&text);
    let Some(parsed) = validation.parsed else {
        let error = validation.error.unwrap_or_default();
        match (validation.error_line, validation.error_column) {
            (Some(line), Some(column)) => bail!("{} (line {}, column {})", error, line, column),
            _ => bail!(error),
        }
    };

    let options = JsonFormatOptions {
        indent,
        sort_keys: args.sort_keys || settings.json_sort_keys,
    };
    let Some(view) = view else {
        return Ok(match args.action {
            JsonAction::Stats => render_stats(&json::stats(&parsed)),
            _ => "Valid JSON".to_string(),
        });
    };

    // Formatting failures are reported as a plain message.
    let rendered = json::render(&parsed, view, &options)?;
    if args.download {
        let content = match view {
            JsonViewMode::Tree => json::format(&parsed, &options)?,
            _ => rendered.clone(),
        };
        let path = services::export(&settings.export_dir, view, &content)?;
        eprintln!("Saved {}", path.display());
    }
    Ok(rendered)
}

fn render_stats(stats: &shared::models::JsonStats) -> String {
    [
        ("size", stats.size),
        ("lines", stats.lines),
        ("keys", stats.keys),
        ("objects", stats.objects),
        ("arrays", stats.arrays),
        ("strings", stats.strings),
        ("numbers", stats.numbers),
        ("booleans", stats.booleans),
        ("nulls", stats.nulls),
    ]
    .iter()
    .map(|(label, count)| format!("{:<9}{}", label, count))
    .collect::<Vec<_>>()
    .join("\n")
}

async fn countdown_command(
    action: CountdownCommand,
    store: &mut CountdownStore<FileStorage>,
    settings: &EngineSettings,
) -> Result<Option<String>> {
    match action {
        CountdownCommand::List => Ok(Some(render_countdowns(&store.list()))),
        CountdownCommand::Add { name, target } => {
            let name = countdown::validate_draft(&name, &target)?;
            let created = store.add(&name, &target)?;
            Ok(Some(created.id))
        }
        CountdownCommand::Update { id, name, target } => {
            let Some(existing) = store.get(&id) else {
                bail!("No countdown with id {}", id);
            };
            let name = countdown::validate_draft(
                name.as_deref().unwrap_or(&existing.name),
                target.as_deref().unwrap_or(&existing.target_date),
            )?;
            store.update(&id, CountdownUpdate { name: Some(name), target_date: target })?;
            Ok(None)
        }
        CountdownCommand::Delete { id } => {
            store.delete(&id)?;
            Ok(None)
        }
        CountdownCommand::Watch { ticks } => {
            watch(store, settings.refresh_interval_ms, ticks).await?;
            Ok(None)
        }
    }
}

fn render_countdowns(countdowns: &[Countdown]) -> String {
    if countdowns.is_empty() {
        return "No countdowns yet".to_string();
    }
    countdowns
        .iter()
        .map(|c| {
            format!(
                "{}  {:<24} {:<26} {}",
                c.id,
                c.name,
                c.target_date,
                countdown::time_remaining(&c.target_date)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// Each tick re-reads the store and recomputes from the stored dates, so a
// skipped tick loses nothing.
async fn watch(store: &CountdownStore<FileStorage>, interval_ms: u64, ticks: Option<u64>) -> Result<()> {
    let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut refreshed = 0u64;
    loop {
        tokio::select! {
            _ = interval.tick() => {
                println!("{}\n", render_countdowns(&store.list()));
                refreshed += 1;
                if ticks.is_some_and(|limit| refreshed >= limit) {
                    break;
                }
            }
            _ = &mut ctrl_c => {
                tracing::info!(refreshed, "Countdown watch interrupted");
                break;
            }
        }
    }
    Ok(())
}
