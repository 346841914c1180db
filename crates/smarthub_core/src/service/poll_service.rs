//! Poll use-case service.
//!
//! # Responsibility
//! - Create and delete polls and append votes over the `polls` slot.
//! - Enforce the 2..=5 option bound on poll drafts.
//!
//! # Invariants
//! - Voting never deduplicates: every call appends exactly one vote.
//! - Option ids are generated independently per option.

use crate::model::new_record_id;
use crate::model::poll::{Poll, PollOption, Vote, MAX_POLL_OPTIONS, MIN_POLL_OPTIONS};
use crate::model::Record;
use crate::notify::{LogNotifier, Notice, Notifier};
use crate::repo::kv_store::{KeyValueStore, StorageKey};
use crate::repo::list_store::PersistedList;
use crate::service::{require_field, ServiceError, ServiceResult};
use chrono::Utc;
use log::info;

/// Form state for a new poll. Starts with two empty options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollDraft {
    pub question: String,
    pub created_by: String,
    options: Vec<String>,
}

impl Default for PollDraft {
    fn default() -> Self {
        Self {
            question: String::new(),
            created_by: String::new(),
            options: vec![String::new(); MIN_POLL_OPTIONS],
        }
    }
}

impl PollDraft {
    pub fn new(question: impl Into<String>, created_by: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            created_by: created_by.into(),
            ..Self::default()
        }
    }

    /// Builds a draft from option texts; the count must be within bounds.
    pub fn with_options(
        question: impl Into<String>,
        created_by: impl Into<String>,
        options: Vec<String>,
    ) -> ServiceResult<Self> {
        if !(MIN_POLL_OPTIONS..=MAX_POLL_OPTIONS).contains(&options.len()) {
            return Err(ServiceError::InvalidInput(format!(
                "a poll needs between {MIN_POLL_OPTIONS} and {MAX_POLL_OPTIONS} options, got {}",
                options.len()
            )));
        }
        Ok(Self {
            question: question.into(),
            created_by: created_by.into(),
            options,
        })
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Updates the text of option `index`; returns `false` if out of range.
    pub fn set_option(&mut self, index: usize, text: impl Into<String>) -> bool {
        match self.options.get_mut(index) {
            Some(slot) => {
                *slot = text.into();
                true
            }
            None => false,
        }
    }

    /// Appends an empty option; refused once the maximum is reached.
    pub fn add_option(&mut self) -> bool {
        if self.options.len() >= MAX_POLL_OPTIONS {
            return false;
        }
        self.options.push(String::new());
        true
    }

    /// Removes option `index`; refused at the minimum or when out of range.
    pub fn remove_option(&mut self, index: usize) -> bool {
        if self.options.len() <= MIN_POLL_OPTIONS || index >= self.options.len() {
            return false;
        }
        self.options.remove(index);
        true
    }
}

pub struct PollService<S: KeyValueStore> {
    polls: PersistedList<Poll, S>,
    notifier: Box<dyn Notifier>,
}

impl<S: KeyValueStore> PollService<S> {
    pub fn open(store: S) -> ServiceResult<Self> {
        Ok(Self {
            polls: PersistedList::open(store, StorageKey::Polls)?,
            notifier: Box::new(LogNotifier),
        })
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn polls(&self) -> &[Poll] {
        self.polls.items()
    }

    pub fn poll(&self, id: &str) -> Option<&Poll> {
        self.polls.find(id)
    }

    pub fn store(&self) -> &S {
        self.polls.store()
    }

    /// Creates a poll at the head of the list.
    pub fn add_poll(&mut self, draft: PollDraft) -> ServiceResult<Poll> {
        require_field("question", &draft.question)?;
        require_field("createdBy", &draft.created_by)?;
        if draft.options.iter().any(|text| text.trim().is_empty()) {
            return Err(ServiceError::MissingField("options"));
        }

        let poll = Poll {
            id: new_record_id(),
            question: draft.question,
            options: draft
                .options
                .into_iter()
                .map(|text| PollOption {
                    id: new_record_id(),
                    text,
                    votes: Vec::new(),
                })
                .collect(),
            created_at: Utc::now(),
            created_by: draft.created_by,
        };
        poll.validate()?;
        self.polls.prepend(poll.clone())?;

        info!(
            "event=poll_add module=polls status=ok options={} count={}",
            poll.options.len(),
            self.polls.items().len()
        );
        self.notifier.notify(Notice::info(
            "New Poll Created",
            format!(
                "Poll \"{}\" created by {}",
                poll.question, poll.created_by
            ),
        ));
        Ok(poll)
    }

    /// Appends one vote for `option_id`.
    ///
    /// Returns the option's new vote count, or `None` when the poll or
    /// option is unknown. The same voter may vote any number of times.
    pub fn vote(
        &mut self,
        poll_id: &str,
        option_id: &str,
        voter_name: &str,
    ) -> ServiceResult<Option<usize>> {
        require_field("voterName", voter_name)?;
        let known = self
            .polls
            .find(poll_id)
            .is_some_and(|poll| poll.option(option_id).is_some());
        if !known {
            return Ok(None);
        }

        let count = self.polls.update(|polls| {
            polls
                .iter_mut()
                .find(|poll| poll.id == poll_id)
                .and_then(|poll| poll.options.iter_mut().find(|opt| opt.id == option_id))
                .map(|option| {
                    option.votes.push(Vote {
                        user_id: new_record_id(),
                        option_id: option_id.to_string(),
                        user_name: voter_name.to_string(),
                    });
                    option.votes.len()
                })
        })?;

        info!("event=poll_vote module=polls status=ok");
        self.notifier.notify(Notice::info(
            "Vote Recorded",
            format!("{voter_name} voted on the poll"),
        ));
        Ok(count)
    }

    /// Removes a poll by id; unknown ids are a no-op.
    pub fn delete_poll(&mut self, id: &str) -> ServiceResult<bool> {
        let removed = self.polls.remove(id)?;
        if removed {
            info!("event=poll_delete module=polls status=ok");
            self.notifier
                .notify(Notice::info("Poll Deleted", "The poll has been deleted"));
        }
        Ok(removed)
    }
}
