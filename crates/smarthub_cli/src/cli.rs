use clap::{Args, Parser, Subcommand, ValueEnum};
use smarthub_core::Priority;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "smarthub")]
#[command(about = "Smart Tools Hub: tasks, notes, polls, calculator and weather", long_about = None)]
pub struct Cli {
    #[arg(long, global = true, help = "SQLite database path (overrides SMARTHUB_DB_PATH)")]
    pub db: Option<PathBuf>,

    #[arg(long, global = true, help = "Log level (overrides SMARTHUB_LOG_LEVEL)")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(subcommand, about = "Shared to-do list")]
    Todo(TodoCommand),

    #[command(subcommand, about = "Sticky notes board")]
    Note(NoteCommand),

    #[command(subcommand, about = "Polls and votes")]
    Poll(PollCommand),

    #[command(about = "Evaluate an expression and record it in history")]
    Calc {
        #[arg(
            allow_hyphen_values = true,
            trailing_var_arg = true,
            help = "Expression, e.g. \"(1+2)*3\" or \"-3+1\"; omit to show history"
        )]
        expression: Vec<String>,
    },

    #[command(about = "Current weather and 5-day forecast")]
    Weather {
        #[arg(help = "City to look up; omit to repeat the last search")]
        city: Option<String>,

        #[arg(long, help = "List matching city names instead of searching")]
        suggest: bool,
    },
}

#[derive(Subcommand)]
pub enum TodoCommand {
    #[command(about = "List tasks grouped by completion")]
    List {
        #[arg(short, long, default_value = "", help = "Filter by assignee substring")]
        filter: String,
    },

    #[command(about = "Add a task")]
    Add(TodoArgs),

    #[command(about = "Mark a task completed (or pending with --undo)")]
    Toggle {
        id: String,

        #[arg(long, help = "Mark the task pending again")]
        undo: bool,
    },

    #[command(about = "Delete a task")]
    Delete { id: String },
}

#[derive(Args)]
pub struct TodoArgs {
    #[arg(help = "Task description")]
    pub text: String,

    #[arg(long, help = "Your name")]
    pub user: String,

    #[arg(long, help = "Assignee")]
    pub assign: String,

    #[arg(long, help = "Due date as YYYY-MM-DD")]
    pub due: String,

    #[arg(long, value_enum, default_value_t = PriorityArg::Medium)]
    pub priority: PriorityArg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
}

impl From<PriorityArg> for Priority {
    fn from(value: PriorityArg) -> Self {
        match value {
            PriorityArg::Low => Self::Low,
            PriorityArg::Medium => Self::Medium,
            PriorityArg::High => Self::High,
        }
    }
}

#[derive(Subcommand)]
pub enum NoteCommand {
    #[command(about = "List notes, newest first")]
    List,

    #[command(about = "Add a note")]
    Add {
        #[arg(long)]
        title: String,

        #[arg(long)]
        content: String,

        #[arg(long, help = "Your name")]
        user: String,
    },

    #[command(about = "Edit a note's title and/or content")]
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        content: Option<String>,

        #[arg(long, help = "Your name")]
        user: String,
    },

    #[command(about = "Delete a note")]
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum PollCommand {
    #[command(about = "List polls with vote percentages")]
    List,

    #[command(about = "Create a poll with 2 to 5 options")]
    Create {
        #[arg(help = "Poll question")]
        question: String,

        #[arg(long, help = "Your name")]
        by: String,

        #[arg(short, long = "option", help = "Option text; repeat 2 to 5 times")]
        options: Vec<String>,
    },

    #[command(about = "Cast a vote for one option")]
    Vote {
        poll_id: String,
        option_id: String,

        #[arg(long, help = "Your name")]
        voter: String,
    },

    #[command(about = "Delete a poll")]
    Delete { id: String },
}
