use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tempfile::TempDir;

use factdr::engine::fact::Fact;
use factdr::session::practice::{Phase, PracticeSession};
use factdr::session::summary::SessionSummary;
use factdr::store::json_store::JsonStore;
use factdr::store::schema::ProfileData;

fn make_test_store() -> (TempDir, JsonStore) {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    (dir, store)
}

/// Drive a session to mastery, missing each fact on first sight, saving the
/// profile after every answer the way the app does.
fn run_to_mastery(session: &mut PracticeSession, store: &JsonStore) -> ProfileData {
    let mut profile = store.load_profile();
    let mut seen: HashSet<Fact> = HashSet::new();
    let mut last_correct = profile.lifetime_correct;
    let mut last_incorrect = profile.lifetime_incorrect;

    while session.advance() == Phase::Active {
        let fact = session.current().unwrap();
        let answer = if seen.insert(fact) {
            0
        } else {
            u32::from(fact.product())
        };
        session.evaluate(fact, answer);

        let stats = session.stats();
        assert!(stats.lifetime_correct >= last_correct);
        assert!(stats.lifetime_incorrect >= last_incorrect);
        last_correct = stats.lifetime_correct;
        last_incorrect = stats.lifetime_incorrect;

        profile.lifetime_correct = stats.lifetime_correct;
        profile.lifetime_incorrect = stats.lifetime_incorrect;
        store.save_profile(&profile).unwrap();
    }
    profile
}

#[test]
fn full_run_reaches_mastery_and_persists_totals() {
    let (_dir, store) = make_test_store();

    let rng = SmallRng::seed_from_u64(99);
    let mut session = PracticeSession::new(&[3, 7], 12, (0, 0), rng).unwrap();
    let profile = run_to_mastery(&mut session, &store);

    assert_eq!(session.phase(), Phase::Mastered);
    assert_eq!(session.difficult_count(), 0);
    // Every fact was missed exactly once.
    assert_eq!(session.stats().session_incorrect, 24);
    assert!(session.stats().session_correct >= 24);

    // What was saved is what comes back.
    let reloaded = store.load_profile();
    assert_eq!(reloaded.lifetime_correct, profile.lifetime_correct);
    assert_eq!(reloaded.lifetime_incorrect, 24);
}

#[test]
fn lifetime_totals_accumulate_across_sessions() {
    let (_dir, store) = make_test_store();

    let rng = SmallRng::seed_from_u64(1);
    let mut first = PracticeSession::new(&[5], 12, (0, 0), rng).unwrap();
    run_to_mastery(&mut first, &store);
    let after_first = store.load_profile();

    // Second session seeds its lifetime counters from the stored record.
    let rng = SmallRng::seed_from_u64(2);
    let mut second = PracticeSession::new(
        &[5],
        12,
        (after_first.lifetime_correct, after_first.lifetime_incorrect),
        rng,
    )
    .unwrap();
    assert_eq!(second.stats().session_correct, 0);
    assert_eq!(second.stats().session_incorrect, 0);
    run_to_mastery(&mut second, &store);

    let after_second = store.load_profile();
    assert!(after_second.lifetime_correct > after_first.lifetime_correct);
    assert_eq!(
        after_second.lifetime_incorrect,
        after_first.lifetime_incorrect + 12
    );
}

#[test]
fn stopped_session_summarizes_unfinished_difficult_facts() {
    let rng = SmallRng::seed_from_u64(42);
    let mut session = PracticeSession::new(&[9], 12, (50, 10), rng).unwrap();

    session.advance();
    let first = session.current().unwrap();
    session.evaluate(first, 0);
    session.advance();
    let second = session.current().unwrap();
    session.evaluate(second, u32::from(second.product()));
    session.stop();

    let summary = SessionSummary::from_session(&session);
    assert!(!summary.mastered);
    assert_eq!(summary.tricky, vec![first]);
    assert_eq!(summary.stats.session_correct, 1);
    assert_eq!(summary.stats.session_incorrect, 1);
    assert_eq!(summary.stats.lifetime_correct, 51);
    assert_eq!(summary.stats.lifetime_incorrect, 11);
}

#[test]
fn same_seed_reproduces_the_same_problem_order() {
    let run = |seed: u64| -> Vec<Fact> {
        let rng = SmallRng::seed_from_u64(seed);
        let mut session = PracticeSession::new(&[4, 8], 12, (0, 0), rng).unwrap();
        let mut order = Vec::new();
        while session.advance() == Phase::Active {
            let fact = session.current().unwrap();
            order.push(fact);
            session.evaluate(fact, u32::from(fact.product()));
        }
        order
    };

    assert_eq!(run(7), run(7));
    assert_ne!(run(7), run(8));
}
