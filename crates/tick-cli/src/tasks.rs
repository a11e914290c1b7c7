use color_eyre::Result;
use tick_core::tasks::Task;
use tick_tasks::StoreTaskRepo;

use crate::{cli::TaskCommand, config, storage};

/// Execute a task subcommand against the on-disk store. Unknown ids print
/// a notice and exit successfully; they are no-ops, not failures.
pub fn handle(cmd: TaskCommand, config: &config::Config) -> Result<()> {
    let repo = StoreTaskRepo::new(storage::store_from_config(config)?);

    match cmd {
        TaskCommand::List { completed } => {
            let list = repo
                .load()
                .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
            if list.is_empty() {
                println!("No tasks yet. Add one with `tick task add <text>`.");
                return Ok(());
            }
            for task in list.pending() {
                print_row(task);
            }
            if completed {
                for task in list.completed() {
                    print_row(task);
                }
            }
        }
        TaskCommand::Add { text } => {
            match repo
                .create(&text.join(" "))
                .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?
            {
                Some(task) => println!("Added task {}: {}", task.id, task.text),
                None => println!("Nothing to add: task text is empty."),
            }
        }
        TaskCommand::Done { id } => {
            match repo
                .set_completed(id, true)
                .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?
            {
                Some(task) => println!("Marked done: {}", task.text),
                None => println!("No task with id {id}."),
            }
        }
        TaskCommand::Undo { id } => {
            match repo
                .set_completed(id, false)
                .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?
            {
                Some(task) => println!("Back to pending: {}", task.text),
                None => println!("No task with id {id}."),
            }
        }
        TaskCommand::Edit { id, text } => {
            match repo
                .rename(id, &text.join(" "))
                .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?
            {
                Some(task) => println!("Updated task {}: {}", task.id, task.text),
                None => println!("No task with id {id}."),
            }
        }
        TaskCommand::Rm { id } => {
            if repo
                .delete(id)
                .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?
            {
                println!("Deleted task {id}.");
            } else {
                println!("No task with id {id}.");
            }
        }
    }

    Ok(())
}

fn print_row(task: &Task) {
    let marker = if task.completed { "[x]" } else { "[ ]" };
    println!("{:>4}  {marker} {}", task.id, task.text);
}
