//! Command-line front end for the tracker.
//!
//! # Responsibility
//! - Resolve database/logging configuration from flags and environment.
//! - Map subcommands onto core service calls and render their results.
//!
//! # Invariants
//! - All field validation happens in `tasktrack_core`; this binary only
//!   reports failures.

mod render;

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;
use tasktrack_core::model::timestamp::now;
use tasktrack_core::{
    default_log_level, init_logging, open_db, parse_timestamp, NewProject, NewTask, NewUser,
    ProjectService, RecordId, SqliteProjectRepository, SqliteTaskRepository,
    SqliteUserRepository, Task, TaskService, TaskTableRow, Timestamp, UserService,
};

#[derive(Debug, Parser)]
#[command(name = "tasktrack", version, about = "Track tasks, projects and users")]
struct Cli {
    /// SQLite database file; created when missing.
    #[arg(long, env = "TASKTRACK_DB", default_value = "tasks.db", global = true)]
    db: PathBuf,
    /// trace|debug|info|warn|error; defaults by build mode.
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Absolute directory for rolling logs. Logging is off when unset.
    #[arg(long, env = "TASKTRACK_LOG_DIR", global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Task(TaskCommand),
    #[command(subcommand)]
    Project(ProjectCommand),
    #[command(subcommand)]
    User(UserCommand),
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// 1, 2 or 3.
        #[arg(long, default_value_t = 2, allow_negative_numbers = true)]
        priority: i64,
        /// ISO-8601 date (`YYYY-MM-DD`) or date-time.
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        project: Option<RecordId>,
        #[arg(long)]
        assignee: Option<RecordId>,
    },
    List,
    Show {
        id: RecordId,
    },
    Search {
        query: String,
    },
    ByProject {
        project_id: RecordId,
    },
    ByUser {
        user_id: RecordId,
    },
    Status {
        id: RecordId,
        status: String,
    },
    Overdue,
    Delete {
        id: RecordId,
    },
}

#[derive(Debug, Subcommand)]
enum ProjectCommand {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
    List,
    Status {
        id: RecordId,
        status: String,
    },
    Delete {
        id: RecordId,
    },
}

#[derive(Debug, Subcommand)]
enum UserCommand {
    Add {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        /// admin, manager or developer.
        #[arg(long)]
        role: String,
    },
    List,
    Update {
        id: RecordId,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        role: Option<String>,
    },
    Delete {
        id: RecordId,
    },
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(|err| anyhow!("logging setup failed: {err}"))?;
    }

    let conn = open_db(&cli.db)
        .map_err(|err| anyhow!("cannot open database `{}`: {err}", cli.db.display()))?;
    info!("event=cli_command module=cli status=start");

    match cli.command {
        Command::Task(command) => {
            run_task(TaskService::new(SqliteTaskRepository::new(&conn)), command)
        }
        Command::Project(command) => {
            run_project(ProjectService::new(SqliteProjectRepository::new(&conn)), command)
        }
        Command::User(command) => {
            run_user(UserService::new(SqliteUserRepository::new(&conn)), command)
        }
    }
}

fn run_task(
    service: TaskService<SqliteTaskRepository<'_>>,
    command: TaskCommand,
) -> anyhow::Result<()> {
    match command {
        TaskCommand::Add {
            title,
            description,
            priority,
            due,
            project,
            assignee,
        } => {
            let input = NewTask {
                title,
                description,
                priority,
                due_date: parse_optional_date("due_date", due.as_deref())?,
                project_id: project,
                assignee_id: assignee,
            };
            let id = service.add_task(&input)?;
            println!("task added: {id}");
        }
        TaskCommand::List => print!("{}", render::task_table(&service.table_rows()?)),
        TaskCommand::Show { id } => match service.get_task(id)? {
            Some(task) => println!("{}", serde_json::to_string_pretty(&task.to_record())?),
            None => anyhow::bail!("task not found: {id}"),
        },
        TaskCommand::Search { query } => print_tasks(&service.search_tasks(&query)?),
        TaskCommand::ByProject { project_id } => {
            print_tasks(&service.list_tasks_by_project(project_id)?)
        }
        TaskCommand::ByUser { user_id } => print_tasks(&service.list_tasks_by_assignee(user_id)?),
        TaskCommand::Status { id, status } => {
            let task = service.set_task_status(id, &status)?;
            println!("task {id} is now {}", task.status);
        }
        TaskCommand::Overdue => {
            print_tasks(&service.list_overdue_tasks_at(now())?)
        }
        TaskCommand::Delete { id } => {
            service.delete_task(id)?;
            println!("task deleted: {id}");
        }
    }
    Ok(())
}

fn run_project(
    service: ProjectService<SqliteProjectRepository<'_>>,
    command: ProjectCommand,
) -> anyhow::Result<()> {
    match command {
        ProjectCommand::Add {
            name,
            description,
            start,
            end,
        } => {
            let input = NewProject {
                name,
                description,
                start_date: parse_optional_date("start_date", start.as_deref())?,
                end_date: parse_optional_date("end_date", end.as_deref())?,
            };
            let id = service.add_project(&input)?;
            println!("project added: {id}");
        }
        ProjectCommand::List => {
            let report = service.progress_report_at(now())?;
            print!("{}", render::project_table(&report));
        }
        ProjectCommand::Status { id, status } => {
            let project = service.set_project_status(id, &status)?;
            println!("project {id} is now {}", project.status);
        }
        ProjectCommand::Delete { id } => {
            service.delete_project(id)?;
            println!("project deleted: {id}");
        }
    }
    Ok(())
}

fn run_user(
    service: UserService<SqliteUserRepository<'_>>,
    command: UserCommand,
) -> anyhow::Result<()> {
    match command {
        UserCommand::Add {
            username,
            email,
            role,
        } => {
            let id = service.add_user(&NewUser {
                username,
                email,
                role,
            })?;
            println!("user added: {id}");
        }
        UserCommand::List => print!("{}", render::user_table(&service.list_users()?)),
        UserCommand::Update {
            id,
            username,
            email,
            role,
        } => {
            let user = service.update_user_info(
                id,
                username.as_deref(),
                email.as_deref(),
                role.as_deref(),
            )?;
            println!("user {id} updated: {} <{}> {}", user.username, user.email, user.role);
        }
        UserCommand::Delete { id } => {
            service.delete_user(id)?;
            println!("user deleted: {id}");
        }
    }
    Ok(())
}

fn print_tasks(tasks: &[Task]) {
    let rows = tasks.iter().map(TaskTableRow::from).collect::<Vec<_>>();
    print!("{}", render::task_table(&rows));
}

fn parse_optional_date(
    field: &'static str,
    value: Option<&str>,
) -> anyhow::Result<Option<Timestamp>> {
    Ok(value
        .filter(|text| !text.trim().is_empty())
        .map(|text| parse_timestamp(field, text))
        .transpose()?)
}

#[cfg(test)]
mod tests {
    use super::{parse_optional_date, Cli, Command, TaskCommand, UserCommand};
    use clap::Parser;

    #[test]
    fn task_add_defaults_priority_and_description() {
        let cli = Cli::try_parse_from(["tasktrack", "task", "add", "--title", "Launch"]).unwrap();
        match cli.command {
            Command::Task(TaskCommand::Add {
                title,
                description,
                priority,
                due,
                project,
                assignee,
            }) => {
                assert_eq!(title, "Launch");
                assert_eq!(description, "");
                assert_eq!(priority, 2);
                assert!(due.is_none() && project.is_none() && assignee.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_db_flag_is_accepted_after_subcommand() {
        let cli = Cli::try_parse_from(["tasktrack", "user", "list", "--db", "/tmp/t.db"]).unwrap();
        assert_eq!(cli.db, std::path::PathBuf::from("/tmp/t.db"));
        assert!(matches!(cli.command, Command::User(UserCommand::List)));
    }

    #[test]
    fn task_add_requires_title() {
        assert!(Cli::try_parse_from(["tasktrack", "task", "add"]).is_err());
    }

    #[test]
    fn blank_dates_are_treated_as_absent() {
        assert_eq!(parse_optional_date("due_date", Some("  ")).unwrap(), None);
        assert!(parse_optional_date("due_date", Some("2025-01-02"))
            .unwrap()
            .is_some());
        let err = parse_optional_date("due_date", Some("soon")).unwrap_err();
        assert!(err.to_string().contains("due_date"));
    }
}
