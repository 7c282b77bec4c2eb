use std::fs;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

const BUNDLED_QUESTIONS: &str = include_str!("../../assets/questions.json");

pub const DEFAULT_DOMAIN: &str = "General";

/// One loaded question. Immutable after load; sessions reference records
/// through `original_index`, never by copying them.
#[derive(Clone, Debug)]
pub struct QuestionRecord {
    pub domain: String,
    pub lesson: Option<String>,
    pub prompt: String,
    pub correct_answer: String,
    pub dummy_answers: Vec<String>,
    /// Position in the loaded bank. Assigned once, never reused, and stable
    /// under session shuffling and re-queueing, so it doubles as the record's
    /// identity key.
    pub original_index: usize,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read question bank: {0}")]
    Unreachable(#[from] std::io::Error),
    #[error("question bank is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("question bank must be a JSON list of records")]
    NotAList,
    #[error("question bank contains no usable records")]
    Empty,
}

pub struct QuestionBank {
    records: Vec<QuestionRecord>,
    domains: Vec<String>,
}

impl QuestionBank {
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse the compiled-in default bank.
    pub fn load_bundled() -> Result<Self, LoadError> {
        Self::from_json(BUNDLED_QUESTIONS)
    }

    pub fn from_json(content: &str) -> Result<Self, LoadError> {
        let raw: Value = serde_json::from_str(content)?;
        let entries = raw.as_array().ok_or(LoadError::NotAList)?;

        let mut records = Vec::with_capacity(entries.len());
        for entry in entries {
            // Index over kept records: dropped entries never enter the bank.
            if let Some(record) = parse_record(entry, records.len()) {
                records.push(record);
            }
        }
        if records.is_empty() {
            return Err(LoadError::Empty);
        }

        let mut domains: Vec<String> = records.iter().map(|r| r.domain.clone()).collect();
        domains.sort();
        domains.dedup();

        Ok(Self { records, domains })
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    /// Distinct domains, sorted ascending for display.
    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Lenient per-record parse: a record that is not an object or lacks a
/// non-empty prompt or answer is dropped, and non-string `dummyAnswers`
/// entries are skipped, so one bad record never blocks the rest of the bank.
fn parse_record(entry: &Value, original_index: usize) -> Option<QuestionRecord> {
    let obj = entry.as_object()?;

    let prompt = obj
        .get("question")
        .or_else(|| obj.get("prompt"))?
        .as_str()
        .filter(|s| !s.is_empty())?;
    let correct_answer = obj
        .get("correctAnswer")?
        .as_str()
        .filter(|s| !s.is_empty())?;

    let domain = obj
        .get("domain")
        .and_then(Value::as_str)
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_DOMAIN);
    let lesson = obj
        .get("lesson")
        .and_then(Value::as_str)
        .map(str::to_string);
    let dummy_answers = obj
        .get("dummyAnswers")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Some(QuestionRecord {
        domain: domain.to_string(),
        lesson,
        prompt: prompt.to_string(),
        correct_answer: correct_answer.to_string(),
        dummy_answers,
        original_index,
    })
}
