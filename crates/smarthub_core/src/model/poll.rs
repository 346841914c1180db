//! Poll, option and vote records for the polling tool.
//!
//! # Invariants
//! - A poll holds `MIN_POLL_OPTIONS..=MAX_POLL_OPTIONS` options.
//! - Option ids are unique within their poll.
//! - Votes are never deduplicated: one record per cast vote.

use super::{require_text, Record, RecordValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const MIN_POLL_OPTIONS: usize = 2;
pub const MAX_POLL_OPTIONS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub user_id: String,
    pub option_id: String,
    pub user_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    pub id: String,
    pub text: String,
    pub votes: Vec<Vote>,
}

impl PollOption {
    pub fn vote_count(&self) -> usize {
        self.votes.len()
    }

    /// Share of `total` votes held by this option, in percent.
    ///
    /// Defined as `0.0` when `total` is zero.
    pub fn percentage(&self, total: usize) -> f64 {
        if total == 0 {
            return 0.0;
        }
        self.votes.len() as f64 / total as f64 * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poll {
    pub id: String,
    pub question: String,
    pub options: Vec<PollOption>,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

impl Poll {
    pub fn total_votes(&self) -> usize {
        self.options.iter().map(PollOption::vote_count).sum()
    }

    /// Percentages in option order; all zero when nobody has voted.
    pub fn percentages(&self) -> Vec<f64> {
        let total = self.total_votes();
        self.options
            .iter()
            .map(|option| option.percentage(total))
            .collect()
    }

    pub fn option(&self, option_id: &str) -> Option<&PollOption> {
        self.options.iter().find(|option| option.id == option_id)
    }
}

impl Record for Poll {
    const KIND: &'static str = "poll";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), RecordValidationError> {
        require_text(Self::KIND, "id", &self.id)?;
        require_text(Self::KIND, "question", &self.question)?;
        require_text(Self::KIND, "createdBy", &self.created_by)?;

        let count = self.options.len();
        if !(MIN_POLL_OPTIONS..=MAX_POLL_OPTIONS).contains(&count) {
            return Err(RecordValidationError::OptionCount(count));
        }

        let mut option_ids = HashSet::with_capacity(count);
        for option in &self.options {
            require_text("option", "id", &option.id)?;
            require_text("option", "text", &option.text)?;
            if !option_ids.insert(option.id.as_str()) {
                return Err(RecordValidationError::DuplicateId {
                    record: "option",
                    id: option.id.clone(),
                });
            }
            for vote in &option.votes {
                require_text("vote", "userName", &vote.user_name)?;
                if vote.option_id != option.id {
                    return Err(RecordValidationError::VoteOptionMismatch {
                        option_id: option.id.clone(),
                        vote_option_id: vote.option_id.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Poll, PollOption, Vote};
    use crate::model::{Record, RecordValidationError};
    use chrono::Utc;

    fn option(id: &str, voters: &[&str]) -> PollOption {
        PollOption {
            id: id.to_string(),
            text: format!("option {id}"),
            votes: voters
                .iter()
                .enumerate()
                .map(|(index, name)| Vote {
                    user_id: format!("{id}-{index}"),
                    option_id: id.to_string(),
                    user_name: (*name).to_string(),
                })
                .collect(),
        }
    }

    fn poll(options: Vec<PollOption>) -> Poll {
        Poll {
            id: "p-1".to_string(),
            question: "Lunch?".to_string(),
            options,
            created_at: Utc::now(),
            created_by: "Riley".to_string(),
        }
    }

    #[test]
    fn percentages_are_zero_without_votes() {
        let poll = poll(vec![option("a", &[]), option("b", &[])]);
        assert_eq!(poll.total_votes(), 0);
        assert_eq!(poll.percentages(), vec![0.0, 0.0]);
    }

    #[test]
    fn percentages_sum_to_hundred_with_votes() {
        let poll = poll(vec![
            option("a", &["x"]),
            option("b", &["y", "y"]),
            option("c", &[]),
        ]);
        let sum: f64 = poll.percentages().iter().sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert!((poll.percentages()[1] - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn validate_rejects_option_count_out_of_range() {
        let single = poll(vec![option("a", &[])]);
        assert_eq!(
            single.validate(),
            Err(RecordValidationError::OptionCount(1))
        );
    }

    #[test]
    fn validate_rejects_duplicate_option_ids_and_misfiled_votes() {
        let duplicate = poll(vec![option("a", &[]), option("a", &[])]);
        assert!(matches!(
            duplicate.validate(),
            Err(RecordValidationError::DuplicateId { .. })
        ));

        let mut misfiled = poll(vec![option("a", &["x"]), option("b", &[])]);
        misfiled.options[0].votes[0].option_id = "b".to_string();
        assert!(matches!(
            misfiled.validate(),
            Err(RecordValidationError::VoteOptionMismatch { .. })
        ));
    }
}
