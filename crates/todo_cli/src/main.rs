//! Command-line entry point for the todo tracker.
//!
//! # Responsibility
//! - Wire storage, repository and service together.
//! - Print service results as JSON.

mod due;

use clap::{Parser, Subcommand};
use eyre::eyre;
use log::info;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use todo_core::db::{open_db, open_db_in_memory};
use todo_core::{
    default_log_level, init_logging, CreateOutcome, NewTodo, SqliteTodoRepository, Todo,
    TodoRepository, TodoService,
};

const SEED_ITEMS: [(&str, (i32, u32, u32)); 3] = [
    ("I must meet Chaves da Silva", (2021, 1, 21)),
    ("I must fix my old car", (2021, 2, 21)),
    ("I must plan my trip to Europe", (2021, 3, 22)),
];

#[derive(Parser)]
#[command(name = "todo", version)]
#[command(about = "Track short tasks with a due date")]
struct Cli {
    /// SQLite database file; an in-memory database is used when omitted
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// trace|debug|info|warn|error; only meaningful with `--log-dir`
    #[arg(long, global = true, requires = "log_dir")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when omitted
    #[arg(long, global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
enum Commands {
    /// Create the sample todos and print the list
    Seed,
    /// Create one todo
    Add {
        text: String,
        /// Due date, `YYYY-MM-DD` or RFC 3339
        #[arg(long, value_parser = due::parse_due)]
        when: Option<i64>,
    },
    /// Print every stored todo
    List,
}

fn main() -> eyre::Result<ExitCode> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    let conn = match cli.db.as_deref() {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let service = TodoService::new(SqliteTodoRepository::try_new(&conn)?);

    match cli.command.unwrap_or(Commands::Seed) {
        Commands::Seed => {
            seed(&service)?;
            print_json(&service.list()?)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Add { text, when } => {
            let outcome = service.create(&Todo::new(NewTodo::new(text, when)))?;
            print_json(&outcome)?;
            Ok(ExitCode::from(outcome_exit_status(&outcome)))
        }
        Commands::List => {
            print_json(&service.list()?)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Process exit status for an `add` result: 0 when created, 2 when rejected.
fn outcome_exit_status(outcome: &CreateOutcome) -> u8 {
    match outcome {
        CreateOutcome::Created(_) => 0,
        CreateOutcome::Rejected { .. } => 2,
    }
}

fn seed<R: TodoRepository>(service: &TodoService<R>) -> eyre::Result<()> {
    for (text, (year, month, day)) in SEED_ITEMS {
        let when = due::day_start(year, month, day)
            .ok_or_else(|| eyre!("invalid seed date {year}-{month}-{day}"))?;
        if let CreateOutcome::Rejected { error } =
            service.create(&Todo::new(NewTodo::new(text, Some(when))))?
        {
            return Err(eyre!("seed item rejected: {}", error.message));
        }
    }
    info!("event=seed module=cli status=ok count={}", SEED_ITEMS.len());
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> eyre::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{outcome_exit_status, seed, Cli, Commands, SEED_ITEMS};
    use clap::Parser;
    use todo_core::db::open_db_in_memory;
    use todo_core::{
        CreateOutcome, FixedClock, FixedIdGenerator, NewTodo, SqliteTodoRepository, Todo,
        TodoService, TodoStatus,
    };

    const DEC_01: i64 = 1_606_780_800_000;

    #[test]
    fn seed_creates_sample_items_in_order() {
        let conn = open_db_in_memory().unwrap();
        let service = TodoService::new(SqliteTodoRepository::try_new(&conn).unwrap());

        seed(&service).unwrap();

        let listed = service.list().unwrap();
        let texts: Vec<_> = listed.iter().map(|todo| todo.text()).collect();
        assert_eq!(
            texts,
            [
                "I MUST MEET CHAVES DA SILVA",
                "I MUST FIX MY OLD CAR",
                "I MUST PLAN MY TRIP TO EUROPE",
            ]
        );
        assert_eq!(listed.len(), SEED_ITEMS.len());
        assert!(listed.iter().all(|todo| todo.status() == TodoStatus::Late));
        assert_eq!(listed[0].when(), Some(1_611_187_200_000));
    }

    #[test]
    fn missing_subcommand_parses_as_none() {
        let cli = Cli::try_parse_from(["todo"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.command.unwrap_or(Commands::Seed), Commands::Seed);
    }

    #[test]
    fn add_parses_text_and_due_date() {
        let cli =
            Cli::try_parse_from(["todo", "add", "buy milk", "--when", "2020-12-01"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Add {
                text: "buy milk".to_string(),
                when: Some(DEC_01),
            })
        );
    }

    #[test]
    fn log_level_without_log_dir_is_refused() {
        assert!(Cli::try_parse_from(["todo", "--log-level", "verbose", "list"]).is_err());
        assert!(Cli::try_parse_from(["todo", "--log-level", "info", "list"]).is_err());
        let with_dir = ["todo", "--log-level", "info", "--log-dir", "/tmp/todo", "list"];
        assert!(Cli::try_parse_from(with_dir).is_ok());
    }

    #[test]
    fn rejected_add_exits_with_status_two_and_prints_error_shape() {
        let conn = open_db_in_memory().unwrap();
        let service = TodoService::new(SqliteTodoRepository::try_new(&conn).unwrap());
        let input = Todo::new_with(
            NewTodo::new("", Some(DEC_01 + 1)),
            &FixedClock(DEC_01),
            &FixedIdGenerator::new("rejected-id"),
        );

        let outcome = service.create(&input).unwrap();

        assert!(matches!(outcome, CreateOutcome::Rejected { .. }));
        assert_eq!(outcome_exit_status(&outcome), 2);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["error"]["message"], "invalid data");
        assert_eq!(json["error"]["data"]["status"], "pending");
        assert_eq!(json["error"]["data"]["id"], "rejected-id");
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn created_add_exits_with_status_zero() {
        let conn = open_db_in_memory().unwrap();
        let service = TodoService::new(SqliteTodoRepository::try_new(&conn).unwrap());

        let outcome = service
            .create(&Todo::new(NewTodo::new("buy milk", Some(DEC_01))))
            .unwrap();

        assert!(matches!(outcome, CreateOutcome::Created(_)));
        assert_eq!(outcome_exit_status(&outcome), 0);
    }
}
