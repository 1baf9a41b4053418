// SPDX-License-Identifier: MIT

use anyhow::Context;
use checklist_conditions::playbook::RunLoader;
use checklist_conditions::property::PropertyUpdate;
use checklist_conditions::visibility::{RunView, RunVisibility};
use clap::{Parser, Subcommand};
use dotenv::dotenv;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show which tasks of a run are visible
    Visibility {
        /// Path to the run definition (YAML or JSON)
        #[arg(short, long)]
        run: String,
    },
    /// Apply property updates to a run and print the resulting notifications
    Apply {
        /// Path to the run definition (YAML or JSON)
        #[arg(short, long)]
        run: String,

        /// Update files; all of them are applied as one change
        #[arg(short, long, required = true)]
        update: Vec<String>,
    },
}

fn print_visibility(visibility: &RunVisibility) {
    for checklist in &visibility.checklists {
        println!("{}", checklist.title);
        for task in &checklist.tasks {
            let marker = task
                .indicator()
                .map(|m| format!(" [{}]", m))
                .unwrap_or_default();
            println!("  [{}] {}{}", task.state, task.title, marker);
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let loader = RunLoader::new();

    match args.command {
        Commands::Visibility { run } => {
            let run = loader
                .load_run(&run)
                .with_context(|| format!("Failed to load run from {}", run))?;
            let view = RunView::load(run);
            print_visibility(view.rendered());
        }
        Commands::Apply { run, update } => {
            let run = loader
                .load_run(&run)
                .with_context(|| format!("Failed to load run from {}", run))?;

            let updates = update
                .iter()
                .map(|path| {
                    loader
                        .load_update(path)
                        .with_context(|| format!("Failed to load update from {}", path))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;

            let mut view = RunView::load(run);
            let notifications = view.apply_and_display(&PropertyUpdate::coalesce(updates));

            log::info!(
                "Applied update to run {}: {} notification(s)",
                view.run().id,
                notifications.len()
            );
            for notification in &notifications {
                println!("{}", notification.message());
            }
            if !notifications.is_empty() {
                println!();
            }
            print_visibility(view.rendered());
        }
    }

    Ok(())
}
