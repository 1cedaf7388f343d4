use chrono::Local;
use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::Result;
use focuslist::app::{EMPTY_MESSAGE, date_heading, quote_for};
use focuslist::{Config, FilterOption, PersistentApp, Task, TaskInput};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "focuslist")]
#[command(about = "focuslist - a to-do list that remembers everything between sessions")]
#[command(version)]
struct Cli {
    /// Path to a YAML config file (default: per-user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the persisted tasks and theme
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        title: String,

        /// Optional details
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Show tasks
    List {
        /// all, active or completed
        #[arg(short, long, default_value = "all")]
        filter: FilterOption,
    },

    /// Mark a task done, or not done again
    Toggle { id: String },

    /// Replace a task's title and description
    Edit {
        id: String,
        title: String,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a task
    Delete { id: String },

    /// Remove every completed task
    ClearCompleted,

    /// Switch between light and dark mode
    Theme {
        /// Print the current mode without switching
        #[arg(long)]
        show: bool,
    },

    /// Show task counts
    Stats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    // Setup tracing
    let level = match cli.verbose {
        0 => config.tracing_level()?,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match &config.source {
        Some(path) => info!(path = %path.display(), "Loaded config"),
        None => debug!("No config file found, using defaults"),
    }

    let mut app = PersistentApp::open(&config)?;

    match cli.command {
        Commands::Add { title, description } => {
            let input = TaskInput::parse(&title, description.as_deref())?;
            let id = app.add_task(input);
            println!("Added {}", id.dimmed());
        }
        Commands::List { filter } => {
            app.select_filter(filter);
            print_list(&app);
        }
        Commands::Toggle { id } => {
            let id = app.resolve_id(&id)?;
            app.toggle_task(&id);
            if let Some(task) = app.tasks().iter().find(|t| t.id == id) {
                print_task(task);
            }
        }
        Commands::Edit { id, title, description } => {
            let id = app.resolve_id(&id)?;
            let input = TaskInput::parse(&title, description.as_deref())?;
            app.update_task(&id, input);
            if let Some(task) = app.tasks().iter().find(|t| t.id == id) {
                print_task(task);
            }
        }
        Commands::Delete { id } => {
            let id = app.resolve_id(&id)?;
            app.delete_task(&id);
            println!("Deleted {}", id.dimmed());
        }
        Commands::ClearCompleted => {
            let removed = app.clear_completed();
            println!("Cleared {} completed task(s)", removed);
        }
        Commands::Theme { show } => {
            if !show {
                app.toggle_theme();
            }
            println!("{}", app.theme().label());
        }
        Commands::Stats => {
            let summary = app.summary();
            println!("{} total", summary.total);
            println!("{} active", summary.active);
            println!("{} completed", summary.completed);
            println!("data: {}", config.data_dir.display());
        }
    }

    Ok(())
}

fn print_list(app: &PersistentApp) {
    let today = Local::now().date_naive();
    println!("{}", date_heading(today).to_uppercase().dimmed());
    println!("{}", "Today's Focus".bold());
    println!("{}", quote_for(today).italic());
    println!("{} · {}", app.theme().label(), app.filter());
    println!();

    let tasks = app.filtered_tasks();
    if tasks.is_empty() {
        println!("{}", EMPTY_MESSAGE.dimmed());
    } else {
        for task in tasks {
            print_task(task);
        }
    }

    let summary = app.summary();
    println!();
    println!("{} total, {} completed", summary.total, summary.completed);
}

fn print_task(task: &Task) {
    if task.completed {
        println!(
            "{} {}  {}",
            "[x]".green(),
            task.title.strikethrough().dimmed(),
            task.id.dimmed()
        );
    } else {
        println!("[ ] {}  {}", task.title.bold(), task.id.dimmed());
    }
    if let Some(description) = &task.description {
        println!("      {}", description.dimmed());
    }
}
