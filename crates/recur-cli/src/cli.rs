use clap::{Parser, Subcommand};

/// Recur: a to-do manager whose tasks repeat on compact rules
///
/// Repeat rules: "d N" every N days (1-400), "y" yearly, "w 1,3" on ISO
/// weekdays (Mon=1), "m 1,-1 [1,6]" on month days (-1 last, -2 second to
/// last) optionally limited to the listed months.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Treat this YYYYMMDD date as today
    #[arg(long, global = true)]
    pub today: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a new task
    Add(AddCommand),
    /// List or search tasks
    List(ListCommand),
    /// Show a single task
    Show(ShowCommand),
    /// Edit a task
    Edit(EditCommand),
    /// Mark a task as done: repeating tasks move to their next date, others are removed
    Done(DoneCommand),
    /// Delete a task
    Delete(DeleteCommand),
    /// Compute the next date of a repeat rule without touching any task
    NextDate(NextDateCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The title of the task
    pub title: String,
    /// The due date (YYYYMMDD or natural language such as "tomorrow"); defaults to today
    #[clap(short, long)]
    pub date: Option<String>,
    /// A free-form comment
    #[clap(short, long, default_value = "")]
    pub comment: String,
    /// The repeat rule
    #[clap(short, long, default_value = "")]
    pub repeat: String,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// A date (DD.MM.YYYY) or text to look for in titles and comments
    #[clap(short, long)]
    pub search: Option<String>,
    /// Maximum number of tasks to show
    #[clap(short, long)]
    pub limit: Option<u32>,
    /// Print JSON instead of a table
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ShowCommand {
    /// The ID of the task
    pub id: String,
    /// Print JSON instead of a summary
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCommand {
    /// The ID of the task to edit
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub comment: Option<String>,

    #[arg(long, help = "Update the repeat rule")]
    pub repeat: Option<String>,
    #[arg(long, conflicts_with = "repeat", help = "Remove the repeat rule (convert to one-time task)")]
    pub repeat_clear: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DoneCommand {
    /// The ID of the task to mark as done
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID of the task to delete
    pub id: String,
    /// Force deletion without confirmation
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct NextDateCommand {
    /// The last scheduled date (YYYYMMDD)
    #[clap(long)]
    pub date: String,
    /// The current date (YYYYMMDD); defaults to today
    #[clap(long)]
    pub now: Option<String>,
    /// The repeat rule
    #[clap(long, default_value = "")]
    pub repeat: String,
}
