use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod add;
pub mod agenda;
pub mod ask;
pub mod reset;
pub mod serve;
pub mod tasks;

use crate::core::AppConfig;
use crate::store::Priority;

#[derive(Subcommand)]
enum Command {
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "5000")]
        port: String,
    },
    /// Add a task to the schedule
    Add {
        #[arg(long)]
        title: String,

        /// Duration in minutes
        #[arg(long, default_value_t = 60)]
        duration: i64,

        #[arg(long, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,

        /// Pin the task to its start time instead of letting the
        /// scheduler place it
        #[arg(long, action, default_value = "false")]
        fixed: bool,

        /// Start time (HH:MM), used when the task is fixed
        #[arg(long)]
        start: Option<String>,
    },
    /// Describe a task in plain language
    Ask {
        prompt: Vec<String>,
    },
    /// Fetch the schedule and print it
    Agenda {},
    /// List stored tasks before scheduling
    Tasks {},
    /// Clear every stored task
    Reset {},
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();
    let config = AppConfig::default();

    // Handle each sub command
    match args.command {
        Some(Command::Serve { host, port }) => {
            serve::run(host, port).await;
        }
        Some(Command::Add {
            title,
            duration,
            priority,
            fixed,
            start,
        }) => {
            add::run(&config, title, duration, priority, fixed, start).await?;
        }
        Some(Command::Ask { prompt }) => {
            ask::run(&config, &prompt.join(" ")).await?;
        }
        Some(Command::Agenda {}) => {
            agenda::run(&config).await?;
        }
        Some(Command::Tasks {}) => {
            tasks::run(&config).await?;
        }
        Some(Command::Reset {}) => {
            reset::run(&config).await?;
        }
        None => {}
    }

    Ok(())
}
