use clap::{Parser, Subcommand};

/// CLI surface definition. The TUI is the primary surface; the task
/// subcommands cover the same operations for one-shot shell use.
#[derive(Parser, Debug)]
#[command(
    name = "tick",
    about = "Local-first to-do list for your terminal",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Optional subcommand; defaults to launching the TUI when absent.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Launch the interactive TUI (press q or Esc to exit).
    Tui,
    /// Print version and exit.
    Version,
    /// Run a health check against the task store.
    Health,
    /// Manage CLI configuration.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Manage tasks from the shell.
    #[command(subcommand)]
    Task(TaskCommand),
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Create a default config file if one does not exist.
    Init,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TaskCommand {
    /// List pending tasks.
    List {
        /// Also show completed tasks.
        #[arg(long)]
        completed: bool,
    },
    /// Add a new task.
    Add {
        /// Task text; multiple words are joined with spaces.
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Mark a task as completed.
    Done {
        /// Task id as shown by `tick task list`.
        id: u64,
    },
    /// Move a completed task back to pending.
    Undo {
        /// Task id as shown by `tick task list --completed`.
        id: u64,
    },
    /// Replace a task's text.
    Edit {
        /// Task id as shown by `tick task list`.
        id: u64,
        /// Replacement text; multiple words are joined with spaces.
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Delete a task.
    Rm {
        /// Task id as shown by `tick task list`.
        id: u64,
    },
}
