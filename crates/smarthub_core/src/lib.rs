//! Core library for Smart Tools Hub: to-do list, notes, polls, calculator
//! and weather lookup over a shared durable key-value store.
//! Front ends hold no business rules; they drive the services exported here.

pub mod calc;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod service;
pub mod weather;

pub use calc::{evaluate, evaluate_display, format_result, CalcError};
pub use config::{HubConfig, WeatherConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{Note, NoteColor};
pub use model::poll::{Poll, PollOption, Vote, MAX_POLL_OPTIONS, MIN_POLL_OPTIONS};
pub use model::task::{Priority, Task};
pub use model::weather::{CitySuggestion, WeatherReport};
pub use model::{Record, RecordValidationError};
pub use notify::{LogNotifier, Notice, NoticeVariant, Notifier, RecordingNotifier};
pub use repo::kv_store::{
    KeyValueStore, MemoryKvStore, SqliteKvStore, StorageKey, StoreError, StoreResult,
};
pub use repo::list_store::{load_list, load_value, save_list, save_value, PersistedList};
pub use service::calculator_service::{Calculator, Evaluation, KeyAction, MAX_HISTORY};
pub use service::note_service::{NoteDraft, NoteService};
pub use service::poll_service::{PollDraft, PollService};
pub use service::todo_service::{TodoDraft, TodoGroups, TodoService};
pub use service::weather_service::{SearchOutcome, SearchTicket, WeatherService};
pub use service::{ServiceError, ServiceResult};
pub use weather::{OpenWeatherClient, WeatherApi, WeatherError, WeatherResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
