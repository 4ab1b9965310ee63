use std::sync::Arc;

use async_trait::async_trait;

use quiz_core::model::{
    AnswerSelection, Question, QuestionDraft, QuestionId, ScoreEntry,
};
use quiz_core::time::{fixed_clock, fixed_now};
use services::{
    BackendError, InMemoryBackend, QuestionSupply, RoundError, RoundLoopService, ScoreSink,
};

fn build_question(id: u64, answers: &[usize]) -> Question {
    QuestionDraft {
        prompt: format!("Q{id}"),
        choices: vec!["a".into(), "b".into(), "c".into()],
        answers: answers.to_vec(),
    }
    .validate(QuestionId::new(id))
    .unwrap()
}

fn sample_questions() -> Vec<Question> {
    vec![
        build_question(1, &[0]),
        build_question(2, &[1]),
        build_question(3, &[0, 2]),
    ]
}

#[tokio::test]
async fn round_loop_submits_score_and_bumps_round() {
    let backend = Arc::new(InMemoryBackend::new(sample_questions()));
    let loop_svc = RoundLoopService::new(
        fixed_clock(),
        backend.clone(),
        backend.clone(),
        "smoke",
    );

    assert_eq!(loop_svc.current_round(), 1);
    let mut round = loop_svc.start_round().await.unwrap();

    let submissions = [
        AnswerSelection::Single(0),
        AnswerSelection::Single(1),
        AnswerSelection::multiple([0, 2]),
    ];
    for selection in submissions {
        round.submit(selection).unwrap();
        round.advance(fixed_now()).unwrap();
    }
    assert!(round.is_complete());

    let summary = loop_svc.finish_round(&round).await.unwrap();
    assert_eq!(summary.score(), 3);
    assert_eq!(summary.total(), 3);
    assert_eq!(summary.round(), 1);

    assert_eq!(loop_svc.current_round(), 2);
    let submitted = backend.submitted().unwrap();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].user, "smoke");
    assert_eq!(submitted[0].score, 3);
    assert_eq!(submitted[0].recorded_at, fixed_now());
}

#[tokio::test]
async fn round_numbers_strictly_increase() {
    let backend = Arc::new(InMemoryBackend::new(vec![build_question(1, &[0])]));
    let loop_svc = RoundLoopService::new(
        fixed_clock(),
        backend.clone(),
        backend.clone(),
        "smoke",
    );

    for expected_round in 1..=3 {
        let mut round = loop_svc.start_round().await.unwrap();
        assert_eq!(round.round(), expected_round);
        round.submit(AnswerSelection::Single(0)).unwrap();
        round.advance(fixed_now()).unwrap();
        loop_svc.finish_round(&round).await.unwrap();
    }

    assert_eq!(loop_svc.current_round(), 4);
}

#[tokio::test]
async fn empty_supply_never_starts_a_round() {
    let backend = Arc::new(InMemoryBackend::new(Vec::new()));
    let loop_svc = RoundLoopService::new(
        fixed_clock(),
        backend.clone(),
        backend.clone(),
        "smoke",
    );

    let err = loop_svc.start_round().await.unwrap_err();
    assert!(matches!(err, RoundError::Empty));
    // Nothing was ever scored.
    assert!(backend.submitted().unwrap().is_empty());
    assert_eq!(loop_svc.current_round(), 1);
}

struct FailingSink;

#[async_trait]
impl ScoreSink for FailingSink {
    async fn submit_score(&self, _entry: &ScoreEntry) -> Result<String, BackendError> {
        Err(BackendError::Unavailable("sink down".into()))
    }
}

#[tokio::test]
async fn sink_failure_does_not_block_round_progression() {
    let backend = Arc::new(InMemoryBackend::new(vec![build_question(1, &[0])]));
    let loop_svc = RoundLoopService::new(
        fixed_clock(),
        backend.clone(),
        Arc::new(FailingSink),
        "smoke",
    );

    let mut round = loop_svc.start_round().await.unwrap();
    round.submit(AnswerSelection::Single(0)).unwrap();
    round.advance(fixed_now()).unwrap();

    let summary = loop_svc.finish_round(&round).await.unwrap();
    assert_eq!(summary.score(), 1);
    assert_eq!(loop_svc.current_round(), 2);
}

#[tokio::test]
async fn questions_are_fetched_once_per_session() {
    struct CountingSupply {
        inner: Arc<InMemoryBackend>,
        calls: std::sync::atomic::AtomicUsize,
    }

    #[async_trait]
    impl QuestionSupply for CountingSupply {
        async fn fetch_questions(&self) -> Result<Vec<Question>, BackendError> {
            self.calls
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            self.inner.fetch_questions().await
        }
    }

    let backend = Arc::new(InMemoryBackend::new(vec![build_question(1, &[0])]));
    let supply = Arc::new(CountingSupply {
        inner: backend.clone(),
        calls: std::sync::atomic::AtomicUsize::new(0),
    });
    let loop_svc = RoundLoopService::new(fixed_clock(), supply.clone(), backend, "smoke");

    for _ in 0..3 {
        let mut round = loop_svc.start_round().await.unwrap();
        round.submit(AnswerSelection::Single(0)).unwrap();
        round.advance(fixed_now()).unwrap();
        loop_svc.finish_round(&round).await.unwrap();
    }

    assert_eq!(supply.calls.load(std::sync::atomic::Ordering::SeqCst), 1);
}
