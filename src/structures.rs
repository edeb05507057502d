use chrono::{offset::Utc, DateTime, Duration};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
    pub id: u64,
    pub text: String,
    pub publication_time: DateTime<Utc>,
}

impl Question {
    pub fn new(id: u64, text: impl Into<String>, publication_time: DateTime<Utc>) -> Self {
        Question {
            id,
            text: text.into(),
            publication_time,
        }
    }

    /// True when the question went out within the last day and is not
    /// scheduled for later.
    pub fn was_published_recently(&self) -> bool {
        self.was_published_recently_at(Utc::now())
    }

    pub fn was_published_recently_at(&self, now: DateTime<Utc>) -> bool {
        now - Duration::days(1) <= self.publication_time && self.publication_time <= now
    }

    pub fn is_published_at(&self, now: DateTime<Utc>) -> bool {
        self.publication_time <= now
    }
}

/// One entry of a seed file: the question text and its publication offset in
/// days from now (negative for questions already published).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionSeed {
    pub text: String,
    pub days: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn question_at(offset: Duration) -> Question {
        Question::new(1, "q", fixed_now() + offset)
    }

    #[test]
    fn future_question_is_not_recent() {
        let q = Question::new(1, "future", Utc::now() + Duration::days(30));
        assert!(!q.was_published_recently());
    }

    #[test]
    fn old_question_is_not_recent() {
        let q = Question::new(1, "old", Utc::now() - Duration::days(30));
        assert!(!q.was_published_recently());
    }

    #[test]
    fn recent_question_is_recent() {
        let q = Question::new(1, "recent", Utc::now() - Duration::hours(1));
        assert!(q.was_published_recently());
    }

    #[test]
    fn window_edges_are_inclusive() {
        assert!(question_at(Duration::zero()).was_published_recently_at(fixed_now()));
        assert!(question_at(-Duration::days(1)).was_published_recently_at(fixed_now()));
        assert!(!question_at(-Duration::days(1) - Duration::seconds(1))
            .was_published_recently_at(fixed_now()));
        assert!(!question_at(Duration::seconds(1)).was_published_recently_at(fixed_now()));
    }

    #[test]
    fn seed_parses_from_json() {
        let seeds: Vec<QuestionSeed> =
            serde_json::from_str(r#"[{"text": "Past question", "days": -30}]"#).unwrap();
        assert_eq!(
            seeds,
            vec![QuestionSeed {
                text: "Past question".into(),
                days: -30
            }]
        );
    }

    proptest! {
        #[test]
        fn future_timestamps_never_recent(secs in 1i64..10 * 365 * 86_400) {
            prop_assert!(!question_at(Duration::seconds(secs)).was_published_recently_at(fixed_now()));
        }

        #[test]
        fn timestamps_older_than_a_day_never_recent(secs in 86_401i64..10 * 365 * 86_400) {
            prop_assert!(!question_at(-Duration::seconds(secs)).was_published_recently_at(fixed_now()));
        }

        #[test]
        fn timestamps_within_the_last_day_are_recent(secs in 0i64..=86_400) {
            prop_assert!(question_at(-Duration::seconds(secs)).was_published_recently_at(fixed_now()));
        }
    }
}
