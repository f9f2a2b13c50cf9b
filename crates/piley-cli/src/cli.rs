use clap::{Parser, Subcommand};
use piley_core::models::{PileMode, RecurrenceRange};

/// Piley: task management with piles, FIFO/LIFO ordering, reminders and weekly statistics
#[derive(Parser, Debug)]
#[command(name = "piley", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Manage piles
    Pile(PileCommand),
    /// Add a new task
    Add(AddCommand),
    /// List tasks
    List(ListCommand),
    /// Mark a task as done
    Do(DoCommand),
    /// Delete a task
    Delete(DeleteCommand),
    /// Show the next reminders across all piles
    Upcoming,
    /// Show weekly completion statistics
    Stats(StatsCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The title of the task
    pub title: String,
    /// The description of the task
    #[clap(short, long)]
    pub description: Option<String>,
    /// The pile (name or ID); defaults to the default pile
    #[clap(short, long)]
    pub pile: Option<String>,
    /// When to be reminded (e.g. "tomorrow 9am", "2026-12-24 18:00")
    #[clap(short, long)]
    pub remind: Option<String>,
    /// Repeat the task (daily, weekly, monthly); requires --remind
    #[clap(long, requires = "remind")]
    pub every: Option<RecurrenceRange>,
    /// Repeat every N days, weeks or months
    #[clap(long, default_value_t = 1)]
    pub frequency: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Only show tasks of this pile (name or ID)
    #[clap(short, long)]
    pub pile: Option<String>,
    /// Include done and deleted tasks
    #[clap(short, long)]
    pub all: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DoCommand {
    /// The ID of the task to mark as done
    pub id: i64,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID of the task to delete
    pub id: i64,
    /// Force deletion without confirmation
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct StatsCommand {
    /// Only show this pile (name or ID)
    #[clap(short, long)]
    pub pile: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct PileCommand {
    #[command(subcommand)]
    pub command: PileSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PileSubcommand {
    /// Add a new pile
    Add(AddPileCommand),
    /// List piles in display order
    List,
    /// Move a pile to another position
    Move(MovePileCommand),
    /// Delete a pile and its tasks
    Delete(DeletePileCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddPileCommand {
    /// The name of the pile
    pub name: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Completion order: free, fifo or lifo
    #[arg(long, default_value = "free")]
    pub mode: PileMode,

    /// Maximum number of active tasks (0 for unlimited)
    #[arg(long, default_value_t = 0)]
    pub limit: u32,

    #[arg(long, default_value = "none")]
    pub color: String,
}

#[derive(Parser, Debug, Clone)]
pub struct MovePileCommand {
    /// Current position (1-based, as shown by `pile list`)
    pub from: usize,
    /// New position (1-based)
    pub to: usize,
}

#[derive(Parser, Debug, Clone)]
pub struct DeletePileCommand {
    /// The pile to delete (name or ID)
    pub pile: String,
    /// Force deletion without confirmation
    #[clap(short, long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_recurring_add() {
        let cli = Cli::parse_from([
            "piley", "add", "Stretch", "--remind", "tomorrow 9am", "--every", "weekly",
            "--frequency", "2",
        ]);
        match cli.command {
            Commands::Add(add) => {
                assert_eq!(add.every, Some(RecurrenceRange::Weekly));
                assert_eq!(add.frequency, 2);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_every_requires_remind() {
        assert!(Cli::try_parse_from(["piley", "add", "Stretch", "--every", "daily"]).is_err());
    }

    #[test]
    fn test_pile_mode_parses_case_insensitively() {
        let cli = Cli::parse_from(["piley", "pile", "add", "Queue", "--mode", "FIFO"]);
        match cli.command {
            Commands::Pile(PileCommand { command: PileSubcommand::Add(add) }) => {
                assert_eq!(add.mode, PileMode::Fifo)
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
