use std::time::{Duration, Instant};

use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::session::options::{self, AnswerOption};
use crate::session::timer::AutoAdvanceTimer;
use crate::store::bank::{QuestionBank, QuestionRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerStatus {
    Unanswered,
    Correct,
    Incorrect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    InProgress,
    Ended,
}

/// Session parameters resolved from the setup screen. `target_count` is a
/// ceiling, not a guarantee: a thinner candidate set just yields a shorter
/// session. Range clamping happens at the config/input surface, never here.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub selected_domains: Vec<String>,
    pub target_count: usize,
}

#[derive(Debug, Error)]
pub enum StartError {
    #[error("no questions match the selected domains")]
    NoCandidates,
}

/// The active quiz session: a queue of bank indices, a cursor, and the
/// answer state machine. The queue holds `original_index` references into
/// the bank and can grow when missed questions are re-queued; question
/// content itself is never copied or mutated.
pub struct Session {
    queue: Vec<usize>,
    position: usize,
    status: AnswerStatus,
    options: Vec<AnswerOption>,
    chosen: Option<usize>,
    timer: AutoAdvanceTimer,
    auto_advance: Duration,
    phase: SessionPhase,
    answered: usize,
    correct: usize,
}

impl Session {
    /// Start a session over `config`'s domains. An emptied selection falls
    /// back to every domain, written back into `config` so the setup screen
    /// reflects it. The filtered candidates are shuffled once, then
    /// truncated to the target ceiling.
    pub fn start<R: Rng>(
        bank: &QuestionBank,
        config: &mut SessionConfig,
        auto_advance: Duration,
        rng: &mut R,
    ) -> Result<Self, StartError> {
        if config.selected_domains.is_empty() {
            config.selected_domains = bank.domains().to_vec();
        }

        let mut queue: Vec<usize> = bank
            .records()
            .iter()
            .filter(|r| config.selected_domains.iter().any(|d| *d == r.domain))
            .map(|r| r.original_index)
            .collect();
        if queue.is_empty() {
            // Unreachable through the setup screen (the fallback above
            // guarantees a non-empty filter), kept as a guard.
            return Err(StartError::NoCandidates);
        }

        queue.shuffle(rng);
        queue.truncate(config.target_count.max(1));

        let first = &bank.records()[queue[0]];
        let options = options::build_options(first, bank.records(), rng);

        Ok(Self {
            queue,
            position: 0,
            status: AnswerStatus::Unanswered,
            options,
            chosen: None,
            timer: AutoAdvanceTimer::default(),
            auto_advance,
            phase: SessionPhase::InProgress,
            answered: 0,
            correct: 0,
        })
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn status(&self) -> AnswerStatus {
        self.status
    }

    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    /// Index of the option the user picked, once answered.
    pub fn chosen(&self) -> Option<usize> {
        self.chosen
    }

    /// Zero-based cursor into the queue.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn current<'a>(&self, bank: &'a QuestionBank) -> &'a QuestionRecord {
        &bank.records()[self.queue[self.position]]
    }

    /// (questions answered, answered correctly) so far.
    pub fn tally(&self) -> (usize, usize) {
        (self.answered, self.correct)
    }

    #[cfg(test)]
    pub fn timer_armed(&self) -> bool {
        self.timer.is_armed()
    }

    /// Submit an answer. A no-op once the current question is answered
    /// (double-submission guard) or the session has ended. A correct answer
    /// arms the auto-advance timer; an incorrect one re-queues the current
    /// question at the tail unless a copy is already pending ahead.
    pub fn answer(&mut self, choice: usize) {
        if self.phase == SessionPhase::Ended || self.status != AnswerStatus::Unanswered {
            return;
        }
        let Some(option) = self.options.get(choice) else {
            return;
        };

        self.timer.cancel();
        self.chosen = Some(choice);
        self.answered += 1;

        if option.is_correct {
            self.status = AnswerStatus::Correct;
            self.correct += 1;
            self.timer.arm(self.auto_advance);
        } else {
            self.status = AnswerStatus::Incorrect;
            let current = self.queue[self.position];
            // Look-ahead-only dedup: a copy behind the cursor doesn't count,
            // so missing a re-queued question on a later appearance queues
            // it again.
            if !self.queue[self.position + 1..].contains(&current) {
                self.queue.push(current);
            }
        }
    }

    /// Move to the next question, or end the session on the last one.
    /// Callable manually or by the timer; either way any pending
    /// auto-advance is canceled first.
    pub fn advance<R: Rng>(&mut self, bank: &QuestionBank, rng: &mut R) {
        self.timer.cancel();
        if self.phase == SessionPhase::Ended {
            return;
        }

        if self.position + 1 < self.queue.len() {
            self.position += 1;
            self.status = AnswerStatus::Unanswered;
            self.chosen = None;
            self.options = options::build_options(self.current(bank), bank.records(), rng);
        } else {
            self.phase = SessionPhase::Ended;
        }
    }

    /// Tick-loop hook: fires the pending auto-advance when its deadline has
    /// passed. Returns true if an advance happened.
    pub fn tick<R: Rng>(&mut self, now: Instant, bank: &QuestionBank, rng: &mut R) -> bool {
        if self.timer.poll(now) {
            self.advance(bank, rng);
            true
        } else {
            false
        }
    }

    /// End the session early (Esc / teardown), dropping any pending timer.
    pub fn abandon(&mut self) {
        self.timer.cancel();
        self.phase = SessionPhase::Ended;
    }
}
