//! Journey: a full evening review session.
//!
//! Covers the whole workflow against the real store: register problems,
//! build a session from a filtered snapshot, step through the queue with
//! reveals and ratings, survive a storage outage mid-session, exhaust,
//! restart, and end.

use fukushu_core::{
    recent_ratings, MemoryStore, Rating, ReviewLogSink, ReviewOptions, ReviewStore,
    SessionController, SessionPhase,
};
use fukushu_e2e_tests::fixtures::TestDataFactory;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[tokio::test]
async fn full_session_lifecycle() {
    let store = MemoryStore::new();

    // Parent registers three problems; one has a history of mistakes.
    for problem in TestDataFactory::batch(3, "rin", "算数") {
        store.put_problem(problem).await.unwrap();
    }
    for log in TestDataFactory::history("p1", "rin", &[Rating::Wrong, Rating::Wrong]) {
        store
            .append_review_log(fukushu_core::NewReviewLog {
                problem_id: log.problem_id,
                user_id: log.user_id,
                rating: log.rating,
                reviewed_at: log.reviewed_at,
            })
            .await
            .unwrap();
    }

    // Session setup: filter the snapshot, start the controller.
    let snapshot = store.snapshot().deduplicated();
    let candidates = snapshot.session_candidates("rin", Some("算数"), None);
    assert_eq!(candidates.len(), 3);

    let mut session = SessionController::new();
    let mut rng = StdRng::seed_from_u64(99);
    session
        .start(
            &candidates,
            &snapshot.review_logs,
            "rin",
            ReviewOptions::default(),
            &mut rng,
        )
        .unwrap();

    // The problem with mistakes comes first.
    assert_eq!(session.current(), Some("p1"));
    assert_eq!(session.phase(), SessionPhase::Active);

    // The history strip under the card shows the two mistakes.
    let history = recent_ratings("p1", "rin", &snapshot.review_logs, 7);
    assert_eq!(history, vec![Rating::Wrong, Rating::Wrong]);

    // Child misses p1 again: it is re-inserted at the end of this short queue.
    session.reveal_answer();
    session.rate(Rating::Wrong, &store).await.unwrap();
    assert_eq!(session.queue().len(), 4);
    assert_eq!(session.queue()[3], "p1");

    // Work through the rest of the queue.
    while session.phase() == SessionPhase::Active {
        session.reveal_answer();
        session.rate(Rating::Correct, &store).await.unwrap();
    }
    assert_eq!(session.phase(), SessionPhase::Exhausted);

    // Every rating landed in the store, appended under the snapshot history.
    let logs = store.list_review_logs("rin").await.unwrap();
    assert_eq!(logs.len(), 2 + 4);

    // Restart replays the original three-card order, not the grown queue.
    session.restart();
    assert_eq!(session.phase(), SessionPhase::Active);
    assert_eq!(session.queue().len(), 3);
    assert_eq!(session.queue()[0], "p1");

    session.end();
    assert_eq!(session.phase(), SessionPhase::Setup);
}

#[tokio::test]
async fn rating_survives_storage_outage() {
    let store = MemoryStore::new();
    for problem in TestDataFactory::batch(2, "yui", "漢字") {
        store.put_problem(problem).await.unwrap();
    }

    let snapshot = store.snapshot();
    let candidates = snapshot.session_candidates("yui", None, None);
    let mut session = SessionController::new();
    let mut rng = StdRng::seed_from_u64(5);
    session
        .start(&candidates, &[], "yui", ReviewOptions::default(), &mut rng)
        .unwrap();

    let current = session.current().unwrap().to_string();
    session.reveal_answer();

    // Signed out mid-session: the submission fails, nothing moves.
    store.set_authenticated(false);
    assert!(session.rate(Rating::Doubt, &store).await.is_err());
    assert_eq!(session.current(), Some(current.as_str()));
    assert!(session.is_answer_revealed());
    assert!(store.list_review_logs("yui").await.unwrap().is_empty());

    // Signing back in and retrying the identical rating completes it.
    store.set_authenticated(true);
    session.rate(Rating::Doubt, &store).await.unwrap();
    let logs = store.list_review_logs("yui").await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].problem_id, current);
    assert_eq!(logs[0].rating, Rating::Doubt);
}

#[tokio::test]
async fn empty_filters_keep_session_in_setup() {
    let store = MemoryStore::new();
    for problem in TestDataFactory::batch(2, "rin", "算数") {
        store.put_problem(problem).await.unwrap();
    }

    let snapshot = store.snapshot();
    // yui has no problems; the subject filter matches nothing for rin
    let candidates = snapshot.session_candidates("rin", Some("理科"), None);
    assert!(candidates.is_empty());

    let mut session = SessionController::new();
    let mut rng = StdRng::seed_from_u64(1);
    let result = session.start(&candidates, &[], "rin", ReviewOptions::default(), &mut rng);
    assert!(result.is_err());
    assert_eq!(session.phase(), SessionPhase::Setup);
}

#[tokio::test]
async fn deleting_a_problem_cascades_but_session_queue_is_private() {
    let store = MemoryStore::new();
    for problem in TestDataFactory::batch(2, "rin", "算数") {
        store.put_problem(problem).await.unwrap();
    }

    let snapshot = store.snapshot();
    let candidates = snapshot.session_candidates("rin", None, None);
    let mut session = SessionController::new();
    let mut rng = StdRng::seed_from_u64(4);
    session
        .start(&candidates, &[], "rin", ReviewOptions::default(), &mut rng)
        .unwrap();

    session.rate(Rating::Wrong, &store).await.unwrap();

    // Another device deletes a problem; the running session's queue is its
    // own and keeps its length. The next snapshot simply lacks the problem.
    store.delete_problem("p0").await.unwrap();
    assert_eq!(session.queue().len(), 3);

    let after = store.snapshot();
    assert_eq!(after.problems.len(), 1);
    // cascade removed p0's logs if the wrong rating targeted it
    for log in &after.review_logs {
        assert_ne!(log.problem_id, "p0");
    }
}
