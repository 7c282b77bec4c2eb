use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::store::bank::QuestionRecord;

pub const MAX_OPTIONS: usize = 4;

/// One multiple-choice option. Ephemeral: regenerated on every question
/// view, never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerOption {
    pub text: String,
    pub is_correct: bool,
}

/// Build the shuffled option set for one question view.
///
/// Starts with the correct answer, adds the question's own authored
/// distractors in order, then tops up to [`MAX_OPTIONS`] from a shuffled
/// pool of every *other* record's correct answer. Duplicate texts are
/// dropped by exact string match, so the result can legitimately come out
/// smaller than four when the pool is thin.
pub fn build_options<R: Rng>(
    question: &QuestionRecord,
    records: &[QuestionRecord],
    rng: &mut R,
) -> Vec<AnswerOption> {
    let mut seen: HashSet<&str> = HashSet::new();
    seen.insert(&question.correct_answer);

    let mut options = vec![AnswerOption {
        text: question.correct_answer.clone(),
        is_correct: true,
    }];

    for dummy in &question.dummy_answers {
        if seen.insert(dummy) {
            options.push(AnswerOption {
                text: dummy.clone(),
                is_correct: false,
            });
        }
    }

    if options.len() < MAX_OPTIONS {
        // Pool membership is by record identity, not answer text: two
        // records sharing an answer are distinct entries until dedup.
        let mut pool: Vec<&str> = records
            .iter()
            .filter(|r| r.original_index != question.original_index)
            .map(|r| r.correct_answer.as_str())
            .collect();
        pool.shuffle(rng);

        for text in pool {
            if options.len() >= MAX_OPTIONS {
                break;
            }
            if seen.insert(text) {
                options.push(AnswerOption {
                    text: text.to_string(),
                    is_correct: false,
                });
            }
        }
    }

    options.shuffle(rng);
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn record(index: usize, answer: &str, dummies: &[&str]) -> QuestionRecord {
        QuestionRecord {
            domain: "General".to_string(),
            lesson: None,
            prompt: format!("question {index}"),
            correct_answer: answer.to_string(),
            dummy_answers: dummies.iter().map(|s| s.to_string()).collect(),
            original_index: index,
        }
    }

    #[test]
    fn test_exactly_one_correct_option() {
        let records = vec![
            record(0, "alpha", &[]),
            record(1, "beta", &[]),
            record(2, "gamma", &[]),
            record(3, "delta", &[]),
        ];
        let mut rng = SmallRng::seed_from_u64(7);

        for question in &records {
            let options = build_options(question, &records, &mut rng);
            let correct: Vec<_> = options.iter().filter(|o| o.is_correct).collect();
            assert_eq!(correct.len(), 1);
            assert_eq!(correct[0].text, question.correct_answer);
        }
    }

    #[test]
    fn test_authored_dummies_give_exactly_four() {
        let question = record(0, "D", &["A", "B", "C"]);
        let records = vec![question.clone(), record(1, "E", &[])];
        let mut rng = SmallRng::seed_from_u64(1);

        let options = build_options(&question, &records, &mut rng);
        assert_eq!(options.len(), 4);
        let mut texts: Vec<&str> = options.iter().map(|o| o.text.as_str()).collect();
        texts.sort();
        assert_eq!(texts, ["A", "B", "C", "D"]);
        assert!(options.iter().find(|o| o.text == "D").unwrap().is_correct);
    }

    #[test]
    fn test_dummy_equal_to_correct_answer_is_dropped() {
        let question = record(0, "same", &["same", "other"]);
        let records = vec![question.clone()];
        let mut rng = SmallRng::seed_from_u64(2);

        let options = build_options(&question, &records, &mut rng);
        assert_eq!(options.len(), 2);
        assert_eq!(options.iter().filter(|o| o.text == "same").count(), 1);
    }

    #[test]
    fn test_distractor_pool_fills_to_four() {
        let records = vec![
            record(0, "a", &[]),
            record(1, "b", &[]),
            record(2, "c", &[]),
            record(3, "d", &[]),
            record(4, "e", &[]),
        ];
        let mut rng = SmallRng::seed_from_u64(3);

        let options = build_options(&records[0], &records, &mut rng);
        assert_eq!(options.len(), 4);
        // Pool entries exclude the question's own record
        assert_eq!(options.iter().filter(|o| o.text == "a").count(), 1);
        assert!(options.iter().find(|o| o.text == "a").unwrap().is_correct);
    }

    #[test]
    fn test_small_pool_yields_fewer_than_four() {
        let records = vec![record(0, "a", &[]), record(1, "b", &[])];
        let mut rng = SmallRng::seed_from_u64(4);

        let options = build_options(&records[0], &records, &mut rng);
        assert_eq!(options.len(), 2);
    }

    #[test]
    fn test_pool_entries_colliding_with_seen_are_skipped() {
        // Two other records share the question's answer text; one more has
        // a distinct text. Only the distinct one can be drawn.
        let records = vec![
            record(0, "dup", &[]),
            record(1, "dup", &[]),
            record(2, "dup", &[]),
            record(3, "unique", &[]),
        ];
        let mut rng = SmallRng::seed_from_u64(5);

        let options = build_options(&records[0], &records, &mut rng);
        assert_eq!(options.len(), 2);
        let mut texts: Vec<&str> = options.iter().map(|o| o.text.as_str()).collect();
        texts.sort();
        assert_eq!(texts, ["dup", "unique"]);
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let question = record(0, "D", &["A", "B", "C"]);
        let records = vec![question.clone()];

        for seed in 0..32 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let options = build_options(&question, &records, &mut rng);
            let mut texts: Vec<&str> = options.iter().map(|o| o.text.as_str()).collect();
            texts.sort();
            assert_eq!(texts, ["A", "B", "C", "D"]);
        }
    }
}
