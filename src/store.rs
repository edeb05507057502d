//! sled-backed persistence for questions.
//!
//! Questions live in their own tree keyed by the big-endian id, so iteration
//! order is creation order. Values are bincode-encoded [`Question`]s.

use chrono::{offset::Utc, DateTime, Duration};
use serde::Serialize;

use crate::error::{PollsError, Result};
use crate::structures::{Question, QuestionSeed};

const QUESTIONS_TREE: &str = "questions";

#[derive(Debug, Clone)]
pub struct QuestionStore {
    database: sled::Db,
    questions: sled::Tree,
}

impl QuestionStore {
    pub fn new(database: sled::Db) -> Result<Self> {
        let questions = database.open_tree(QUESTIONS_TREE)?;
        Ok(QuestionStore {
            database,
            questions,
        })
    }

    /// A throwaway store that is removed when the last handle drops.
    pub fn temporary() -> Result<Self> {
        Self::new(sled::Config::new().temporary(true).open()?)
    }

    pub fn database(&self) -> &sled::Db {
        &self.database
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn create(&self, text: &str, publication_time: DateTime<Utc>) -> Result<Question> {
        let question = Question::new(self.database.generate_id()?, text, publication_time);
        self.questions
            .insert(question.id.to_be_bytes(), encode(&question)?)?;
        log::debug!("Stored question {}: {:?}", question.id, question.text);
        Ok(question)
    }

    /// Creates a question published `days` from `now`; negative offsets are in
    /// the past.
    pub fn create_with_offset(
        &self,
        text: &str,
        days: i64,
        now: DateTime<Utc>,
    ) -> Result<Question> {
        self.create(text, offset_from(now, days)?)
    }

    /// Writes every seed in one atomic batch.
    pub fn insert_batch(&self, seeds: &[QuestionSeed], now: DateTime<Utc>) -> Result<Vec<Question>> {
        let mut batch = sled::Batch::default();
        let mut created = Vec::with_capacity(seeds.len());
        for seed in seeds {
            let question = Question::new(
                self.database.generate_id()?,
                seed.text.as_str(),
                offset_from(now, seed.days)?,
            );
            batch.insert(question.id.to_be_bytes().to_vec(), encode(&question)?);
            created.push(question);
        }
        self.questions.apply_batch(batch)?;
        Ok(created)
    }

    pub fn get(&self, id: u64) -> Result<Option<Question>> {
        match self.questions.get(id.to_be_bytes())? {
            Some(raw) => Ok(Some(decode(&raw)?)),
            None => Ok(None),
        }
    }

    /// Questions whose publication time has passed, newest first, truncated
    /// to `limit` when given.
    pub fn published(&self, now: DateTime<Utc>, limit: Option<usize>) -> Result<Vec<Question>> {
        let mut questions = Vec::new();
        for entry in self.questions.iter() {
            let (_, raw) = entry?;
            let question = decode(&raw)?;
            if question.is_published_at(now) {
                questions.push(question);
            }
        }
        questions.sort_by(|a, b| {
            b.publication_time
                .cmp(&a.publication_time)
                .then(b.id.cmp(&a.id))
        });
        if let Some(limit) = limit {
            questions.truncate(limit);
        }
        Ok(questions)
    }

    /// Looks up a question that has already been published. Scheduled
    /// questions are reported as missing.
    pub fn published_detail(&self, id: u64, now: DateTime<Utc>) -> Result<Question> {
        match self.get(id)? {
            Some(question) if question.is_published_at(now) => Ok(question),
            _ => Err(PollsError::NotFound(id)),
        }
    }
}

fn offset_from(now: DateTime<Utc>, days: i64) -> Result<DateTime<Utc>> {
    Duration::try_days(days)
        .and_then(|delta| now.checked_add_signed(delta))
        .ok_or(PollsError::InvalidOffset(days))
}

fn encode(input: impl Serialize) -> Result<Vec<u8>> {
    Ok(bincode::serialize(&input)?)
}

fn decode(raw: &[u8]) -> Result<Question> {
    Ok(bincode::deserialize(raw)?)
}
