//! Command-line front end for Smart Tools Hub.
//!
//! # Responsibility
//! - Map subcommands onto core services over the SQLite store.
//! - Print notices and results; hold no business rules.

mod cli;

use chrono::{NaiveDate, Utc};
use clap::Parser as _;
use cli::{Cli, Commands, NoteCommand, PollCommand, TodoArgs, TodoCommand};
use log::error;
use smarthub_core::db::open_db;
use smarthub_core::weather::debounce::AUTOCOMPLETE_DELAY;
use smarthub_core::{
    init_logging, Calculator, HubConfig, KeyValueStore, NoteDraft, NoteService, Notice, Notifier,
    OpenWeatherClient, PollDraft, PollService, SearchOutcome, ServiceError,
    SqliteKvStore, TodoDraft, TodoService, WeatherService,
};
use std::error::Error;
use std::process::ExitCode;
use std::time::Instant;

type CliResult<T = ()> = Result<T, Box<dyn Error>>;

/// Prints notices to stderr so stdout stays scriptable.
#[derive(Debug, Clone, Copy)]
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        let marker = if notice.is_destructive() { "!" } else { "*" };
        eprintln!("{marker} {}: {}", notice.title, notice.description);
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_exit module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult {
    let mut config = HubConfig::from_env();
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    init_logging(&config.log_level, &config.log_dir)?;

    let conn = open_db(&config.db_path)?;
    let store = SqliteKvStore::new(&conn);

    match cli.command {
        Commands::Todo(command) => handle_todo(command, &store),
        Commands::Note(command) => handle_note(command, &store),
        Commands::Poll(command) => handle_poll(command, &store),
        Commands::Calc { expression } => handle_calc(&expression.join(""), &store),
        Commands::Weather { city, suggest } => handle_weather(&config, city, suggest, &store),
    }
}

fn handle_todo(command: TodoCommand, store: &impl KeyValueStore) -> CliResult {
    let mut service = TodoService::open(store)?.with_notifier(ConsoleNotifier);
    match command {
        TodoCommand::List { filter } => {
            let groups = service.grouped(&filter);
            println!("Pending ({})", groups.pending.len());
            for task in &groups.pending {
                println!(
                    "  [ ] {}  {}  -> {}  due {}  {}",
                    task.id,
                    task.text,
                    task.assigned_to,
                    task.due_date.format("%Y-%m-%d"),
                    task.priority.as_str()
                );
            }
            println!("Completed ({})", groups.completed.len());
            for task in &groups.completed {
                println!("  [x] {}  {}  -> {}", task.id, task.text, task.assigned_to);
            }
        }
        TodoCommand::Add(args) => {
            let task = service.add_todo(todo_draft(args)?)?;
            println!("{}", task.id);
        }
        TodoCommand::Toggle { id, undo } => {
            if service.toggle_todo(&id, !undo)?.is_none() {
                return Err(format!("no task with id `{id}`").into());
            }
        }
        TodoCommand::Delete { id } => {
            if !service.delete_todo(&id)? {
                return Err(format!("no task with id `{id}`").into());
            }
        }
    }
    Ok(())
}

fn todo_draft(args: TodoArgs) -> CliResult<TodoDraft> {
    let due_date = NaiveDate::parse_from_str(&args.due, "%Y-%m-%d")
        .map_err(|err| ServiceError::InvalidInput(format!("due date `{}`: {err}", args.due)))?
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc());
    Ok(TodoDraft {
        text: args.text,
        user_name: args.user,
        assigned_to: args.assign,
        due_date,
        priority: args.priority.into(),
    })
}

fn handle_note(command: NoteCommand, store: &impl KeyValueStore) -> CliResult {
    let mut service = NoteService::open(store)?.with_notifier(ConsoleNotifier);
    match command {
        NoteCommand::List => {
            for note in service.notes() {
                println!(
                    "{}  [{}] {}  by {} on {}",
                    note.id,
                    note.color.as_str(),
                    note.title,
                    note.user_name,
                    note.created_at.format("%Y-%m-%d")
                );
                println!("    {}", note.content);
            }
        }
        NoteCommand::Add {
            title,
            content,
            user,
        } => {
            let draft = NoteDraft {
                title,
                content,
                user_name: user,
            };
            let note = service.add_or_update_note(draft)?;
            println!("{}", note.id);
        }
        NoteCommand::Edit {
            id,
            title,
            content,
            user,
        } => {
            let Some(mut draft) = service.start_edit(&id) else {
                return Err(format!("no note with id `{id}`").into());
            };
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(content) = content {
                draft.content = content;
            }
            draft.user_name = user;
            service.add_or_update_note(draft)?;
        }
        NoteCommand::Delete { id } => {
            if !service.delete_note(&id)? {
                return Err(format!("no note with id `{id}`").into());
            }
        }
    }
    Ok(())
}

fn handle_poll(command: PollCommand, store: &impl KeyValueStore) -> CliResult {
    let mut service = PollService::open(store)?.with_notifier(ConsoleNotifier);
    match command {
        PollCommand::List => {
            for poll in service.polls() {
                println!(
                    "{}  {}  by {} ({} votes)",
                    poll.id,
                    poll.question,
                    poll.created_by,
                    poll.total_votes()
                );
                for (option, share) in poll.options.iter().zip(poll.percentages()) {
                    println!(
                        "    {}  {:<24} {:>3} votes {:>5.1}%",
                        option.id,
                        option.text,
                        option.vote_count(),
                        share
                    );
                }
            }
        }
        PollCommand::Create {
            question,
            by,
            options,
        } => {
            let draft = PollDraft::with_options(question, by, options)?;
            let poll = service.add_poll(draft)?;
            println!("{}", poll.id);
        }
        PollCommand::Vote {
            poll_id,
            option_id,
            voter,
        } => match service.vote(&poll_id, &option_id, &voter)? {
            Some(count) => println!("{count}"),
            None => return Err(format!("no option `{option_id}` in poll `{poll_id}`").into()),
        },
        PollCommand::Delete { id } => {
            if !service.delete_poll(&id)? {
                return Err(format!("no poll with id `{id}`").into());
            }
        }
    }
    Ok(())
}

fn handle_calc(expression: &str, store: &impl KeyValueStore) -> CliResult {
    let mut calc = Calculator::open(store)?.with_notifier(ConsoleNotifier);
    if expression.trim().is_empty() {
        for line in calc.history() {
            println!("{line}");
        }
        return Ok(());
    }

    calc.input(expression.trim());
    if let Some(evaluation) = calc.evaluate()? {
        println!("{}", evaluation.result);
    }
    Ok(())
}

fn handle_weather(
    config: &HubConfig,
    city: Option<String>,
    suggest: bool,
    store: &impl KeyValueStore,
) -> CliResult {
    let client = OpenWeatherClient::new(&config.weather)?;
    let mut service = WeatherService::new(client, store).with_notifier(ConsoleNotifier);

    if suggest {
        let now = Instant::now();
        service.set_query(city.unwrap_or_default(), now);
        service.poll_suggestions(now + AUTOCOMPLETE_DELAY);
        for suggestion in service.suggestions() {
            println!("{}", suggestion.label());
        }
        return Ok(());
    }

    let outcome = match city {
        Some(city) => {
            service.set_query(city, Instant::now());
            service.submit()?
        }
        None => service.restore_last_city()?,
    };
    match outcome {
        None => Err("no city given and no previous search saved".into()),
        Some(SearchOutcome::Failed(err)) => Err(err.into()),
        Some(SearchOutcome::Stale) => Ok(()),
        Some(SearchOutcome::Applied) => {
            let Some(report) = service.report() else {
                return Ok(());
            };
            let current = &report.current;
            println!("{}, {}", report.city, report.country);
            println!(
                "  {}°  {}  humidity {}%  wind {} m/s",
                current.temp,
                current.condition.description,
                current.humidity,
                current.wind_speed
            );
            for day in &report.forecast {
                println!("  {:<4} {:>4}° / {:>4}°  {}", day.date, day.min, day.max, day.main);
            }
            println!("  fetched {}", Utc::now().format("%Y-%m-%d %H:%M UTC"));
            Ok(())
        }
    }
}
