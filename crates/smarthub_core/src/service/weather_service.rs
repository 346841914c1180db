//! Weather lookup use-case service.
//!
//! # Responsibility
//! - Hold query, suggestion, report and loading state.
//! - Debounce autocomplete lookups and persist the last searched city.
//! - Apply only the response to the most recently issued search.
//!
//! # Invariants
//! - Every `begin_search` issues a strictly larger sequence number.
//! - Completions carrying an older sequence number are discarded.
//! - A failed search keeps the previously shown report.

use crate::model::weather::{CitySuggestion, WeatherReport};
use crate::notify::{LogNotifier, Notice, Notifier};
use crate::repo::kv_store::{KeyValueStore, StorageKey};
use crate::repo::list_store::{load_value, save_value};
use crate::service::ServiceResult;
use crate::weather::{normalize_report, Debouncer, WeatherApi, WeatherError, WeatherResult};
use log::{debug, info, warn};
use std::time::Instant;

/// Queries must be longer than this to trigger autocomplete.
pub const MIN_SUGGEST_CHARS: usize = 2;
pub const MAX_SUGGESTIONS: usize = 5;

/// Handle for one issued search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    city: String,
}

impl SearchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

#[derive(Debug)]
pub enum SearchOutcome {
    /// The report is now the visible one.
    Applied,
    /// A newer search was issued; this completion was dropped.
    Stale,
    /// The search failed; the previous report (if any) stays visible.
    Failed(WeatherError),
}

/// Fetches both endpoints and normalizes them into a report.
pub fn fetch_report<A: WeatherApi + ?Sized>(api: &A, city: &str) -> WeatherResult<WeatherReport> {
    let current = api.current(city)?;
    let forecast = api.forecast(city)?;
    normalize_report(&current, &forecast)
}

pub struct WeatherService<A: WeatherApi, S: KeyValueStore> {
    api: A,
    store: S,
    query: String,
    suggestions: Vec<CitySuggestion>,
    report: Option<WeatherReport>,
    loading: bool,
    last_issued: u64,
    debouncer: Debouncer,
    notifier: Box<dyn Notifier>,
}

impl<A: WeatherApi, S: KeyValueStore> WeatherService<A, S> {
    pub fn new(api: A, store: S) -> Self {
        Self {
            api,
            store,
            query: String::new(),
            suggestions: Vec::new(),
            report: None,
            loading: false,
            last_issued: 0,
            debouncer: Debouncer::default(),
            notifier: Box::new(LogNotifier),
        }
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn suggestions(&self) -> &[CitySuggestion] {
        &self.suggestions
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        self.report.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Last successfully searched city, if one was persisted.
    pub fn last_city(&self) -> ServiceResult<Option<String>> {
        Ok(load_value(&self.store, StorageKey::LastSearchedCity)?)
    }

    /// Re-runs the search for the persisted city, as on page load.
    pub fn restore_last_city(&mut self) -> ServiceResult<Option<SearchOutcome>> {
        let Some(city) = self.last_city()? else {
            return Ok(None);
        };
        self.query = city.clone();
        self.search(&city).map(Some)
    }

    /// Updates the query text and restarts the autocomplete timer.
    pub fn set_query(&mut self, query: impl Into<String>, now: Instant) {
        self.query = query.into();
        self.debouncer.schedule(self.query.clone(), now);
    }

    /// Runs the autocomplete lookup once the debounce delay has elapsed.
    ///
    /// Returns `true` when the suggestion list was refreshed.
    pub fn poll_suggestions(&mut self, now: Instant) -> bool {
        let Some(query) = self.debouncer.poll(now) else {
            return false;
        };

        if query.chars().count() <= MIN_SUGGEST_CHARS {
            self.suggestions.clear();
            return true;
        }

        match self.api.geocode(&query, MAX_SUGGESTIONS) {
            Ok(entries) => {
                self.suggestions = entries
                    .into_iter()
                    .take(MAX_SUGGESTIONS)
                    .map(|entry| CitySuggestion {
                        name: entry.name,
                        country: entry.country,
                    })
                    .collect();
                debug!(
                    "event=weather_suggest module=weather status=ok count={}",
                    self.suggestions.len()
                );
            }
            Err(err) => {
                warn!("event=weather_suggest module=weather status=error error={err}");
                self.suggestions.clear();
            }
        }
        true
    }

    /// Searches the current query; blank queries are ignored.
    pub fn submit(&mut self) -> ServiceResult<Option<SearchOutcome>> {
        let city = self.query.trim().to_string();
        if city.is_empty() {
            return Ok(None);
        }
        self.suggestions.clear();
        self.debouncer.cancel();
        self.search(&city).map(Some)
    }

    /// Picks a suggestion and searches `"<name>, <country>"`.
    pub fn select_suggestion(
        &mut self,
        suggestion: &CitySuggestion,
    ) -> ServiceResult<SearchOutcome> {
        let label = suggestion.label();
        self.query = label.clone();
        self.suggestions.clear();
        self.debouncer.cancel();
        self.search(&label)
    }

    /// Issues, performs and completes one search synchronously.
    pub fn search(&mut self, city: &str) -> ServiceResult<SearchOutcome> {
        let ticket = self.begin_search(city);
        let result = fetch_report(&self.api, ticket.city());
        self.complete_search(&ticket, result)
    }

    /// Marks a search as in flight and returns its ticket.
    pub fn begin_search(&mut self, city: &str) -> SearchTicket {
        self.last_issued += 1;
        self.loading = true;
        debug!(
            "event=weather_search module=weather status=start seq={}",
            self.last_issued
        );
        SearchTicket {
            seq: self.last_issued,
            city: city.to_string(),
        }
    }

    /// Applies the result of `ticket` unless a newer search was issued.
    pub fn complete_search(
        &mut self,
        ticket: &SearchTicket,
        result: WeatherResult<WeatherReport>,
    ) -> ServiceResult<SearchOutcome> {
        if ticket.seq != self.last_issued {
            debug!(
                "event=weather_search module=weather status=stale seq={} latest={}",
                ticket.seq, self.last_issued
            );
            return Ok(SearchOutcome::Stale);
        }
        self.loading = false;

        match result {
            Ok(report) => {
                save_value(&self.store, StorageKey::LastSearchedCity, ticket.city())?;
                info!(
                    "event=weather_search module=weather status=ok seq={} forecast_days={}",
                    ticket.seq,
                    report.forecast.len()
                );
                self.report = Some(report);
                Ok(SearchOutcome::Applied)
            }
            Err(err) => {
                warn!(
                    "event=weather_search module=weather status=error seq={} error={}",
                    ticket.seq, err
                );
                self.notifier.notify(Notice::destructive(
                    "Error",
                    "Failed to fetch weather data. Please try again.",
                ));
                Ok(SearchOutcome::Failed(err))
            }
        }
    }
}
