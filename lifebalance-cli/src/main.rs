use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use lifebalance_core::{
    EnergyLevel, Task, generate_day_plan, order_tasks, parse_slots, summarize, today_in,
};
use lifebalance_ingest::load_pending_tasks;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod advisor;
mod calendar;
mod config;
mod report;
mod state;

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "lifebalance", version, about = "Plan your day around your energy")]
struct Cli {
    /// Config file (default: ~/.lifebalance/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build today's plan from pending tasks and free time slots
    Plan {
        /// Task export (.json or .csv)
        #[arg(long)]
        tasks: Option<PathBuf>,

        /// Free time slot, HH:MM-HH:MM (repeatable; default from config)
        #[arg(long = "slot")]
        slots: Vec<String>,

        /// How energetic you are today: high, medium or low
        #[arg(long)]
        energy: Option<String>,

        /// Plan as if today were this date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Print {plan, advice, summary} as JSON
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Also write the plan as an ICS calendar
        #[arg(long)]
        ics: Option<PathBuf>,
    },

    /// Show pending tasks with the values the planner will use
    Tasks {
        #[arg(long)]
        tasks: Option<PathBuf>,

        /// Rank for this energy level instead of listing in file order
        #[arg(long)]
        energy: Option<String>,

        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Config file helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
    /// Print the config file location
    Path,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lifebalance=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Plan {
            tasks,
            slots,
            energy,
            today,
            json,
            ics,
        } => {
            let cfg = config::load_config(cli.config.as_deref())?;
            plan(&cfg, tasks, slots, energy, today, json, ics)?;
        }

        Command::Tasks {
            tasks,
            energy,
            today,
        } => {
            let cfg = config::load_config(cli.config.as_deref())?;
            list_tasks(&cfg, tasks, energy, today)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => match config::init_config(cli.config.as_deref())? {
                config::InitOutcome::Created(p) => println!("Wrote {}", p.display()),
                config::InitOutcome::AlreadyExists(p) => {
                    println!("Config already exists: {}", p.display())
                }
            },
            ConfigCommand::Show => {
                let cfg = config::load_config(cli.config.as_deref())?;
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
            ConfigCommand::Path => {
                println!("{}", config::config_path(cli.config.as_deref())?.display());
            }
        },
    }

    Ok(())
}

fn resolve_tasks(cfg: &Config, flag: Option<PathBuf>) -> Result<Vec<Task>> {
    let path = match flag.or_else(|| cfg.planner.tasks_file.as_ref().map(PathBuf::from)) {
        Some(p) => p,
        None => state::default_tasks_path()?,
    };
    if !path.exists() {
        bail!(
            "Task file not found: {} (pass --tasks <file.json|file.csv>)",
            path.display()
        );
    }
    let tasks = load_pending_tasks(&path)?;
    info!(path = %path.display(), pending = tasks.len(), "loaded tasks");
    Ok(tasks)
}

fn resolve_energy(cfg: &Config, flag: Option<String>) -> Result<EnergyLevel> {
    match flag {
        Some(e) => e.parse(),
        None => {
            let level = EnergyLevel::parse_lenient(&cfg.planner.energy);
            if level.as_str() != cfg.planner.energy.trim().to_lowercase() {
                warn!(configured = %cfg.planner.energy, "unknown energy level in config, using medium");
            }
            Ok(level)
        }
    }
}

fn resolve_today(cfg: &Config, flag: Option<NaiveDate>) -> Result<NaiveDate> {
    match flag {
        Some(d) => Ok(d),
        None => today_in(&cfg.planner.timezone),
    }
}

fn plan(
    cfg: &Config,
    tasks: Option<PathBuf>,
    slots: Vec<String>,
    energy: Option<String>,
    today: Option<NaiveDate>,
    json: bool,
    ics: Option<PathBuf>,
) -> Result<()> {
    let energy = resolve_energy(cfg, energy)?;
    let today = resolve_today(cfg, today)?;

    let slots = if slots.is_empty() {
        cfg.planner.slots.clone()
    } else {
        slots
    };
    // Reject the whole request on any bad slot before planning.
    let windows = parse_slots(&slots)?;

    let tasks = resolve_tasks(cfg, tasks)?;

    let plan = generate_day_plan(&tasks, &windows, energy.as_str(), today);
    let summary = summarize(&tasks, &windows, energy.as_str(), today, &plan);
    let advice = advisor::generate_advice(&plan, energy.as_str());

    info!(
        %today,
        %energy,
        entries = plan.len(),
        status = ?summary.status,
        "plan ready"
    );

    // Build calendar events up front so a bad timezone or DST gap fails
    // before anything reaches stdout.
    let events = match &ics {
        Some(_) => Some(
            calendar::plan_to_events(&plan, today, &cfg.planner.timezone)
                .context("building --ics calendar")?,
        ),
        None => None,
    };

    if json {
        let resp = report::PlanResponse {
            plan: &plan,
            advice: &advice,
            summary: &summary,
        };
        println!("{}", serde_json::to_string_pretty(&resp)?);
    } else {
        print!("{}", report::render_plan(&plan, &advice, &summary));
    }

    if let (Some(path), Some(events)) = (ics, events) {
        write_ics(&events, &path)?;
    }

    Ok(())
}

fn write_ics(events: &[calendar::CalendarEvent], path: &Path) -> Result<()> {
    let ics = calendar::events_to_ics(events);
    fs::write(path, ics).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), events = events.len(), "wrote calendar");
    Ok(())
}

fn list_tasks(
    cfg: &Config,
    tasks: Option<PathBuf>,
    energy: Option<String>,
    today: Option<NaiveDate>,
) -> Result<()> {
    let today = resolve_today(cfg, today)?;
    let tasks = resolve_tasks(cfg, tasks)?;

    let listed = match energy {
        Some(e) => {
            let level: EnergyLevel = e.parse()?;
            let ranked = order_tasks(&tasks, level, today);
            println!(
                "# {} of {} tasks fit a {} energy day, in planning order\n",
                ranked.len(),
                tasks.len(),
                level
            );
            ranked
        }
        None => {
            println!("# {} pending tasks (today = {})\n", tasks.len(), today);
            tasks
                .iter()
                .enumerate()
                .map(|(i, t)| t.normalize(i, today))
                .collect()
        }
    };

    print!("{}", report::render_tasks(&listed));
    Ok(())
}
