use std::sync::Arc;

use catalog::{CatalogError, InMemoryRepository};
use quiz_core::model::{Entry, QuizSettings, Region};
use quiz_core::time::fixed_now;
use services::{Clock, QuizEvent, QuizService, SessionError};

fn entries(names: &[&str]) -> Vec<Entry> {
    names.iter().map(|n| Entry::new(*n, "🏳").unwrap()).collect()
}

fn service() -> QuizService {
    let repo = InMemoryRepository::new();
    repo.insert_region(
        Region::Europe,
        entries(&["France", "Spain", "Italy", "Norway", "Poland", "Greece"]),
    )
    .unwrap();
    repo.insert_region(Region::Oceania, entries(&["Fiji", "Tonga", "Samoa"]))
        .unwrap();
    QuizService::new(Clock::fixed(fixed_now()), Arc::new(repo))
}

#[tokio::test]
async fn region_session_runs_to_result() {
    let svc = service();
    let settings = QuizSettings::new(4, 5).unwrap();
    let mut session = svc.start_session(Region::Europe, settings).await.unwrap();
    assert_eq!(session.total(), 4);
    assert_eq!(session.started_at(), fixed_now());

    let mut clock = Clock::fixed(fixed_now());
    while !session.is_finished() {
        let answer = session.current_entry().unwrap().name().to_owned();
        session.submit_answer(Some(&answer), clock.now());
        clock.advance_millis(1_000);
        session.run_until(clock.now()).unwrap();
    }

    let result = session.result().unwrap();
    assert_eq!((result.score(), result.total()), (4, 4));
    assert_eq!(result.percent(), 100);
}

#[tokio::test]
async fn whole_world_pool_spans_regions() {
    let svc = service();
    let pool = svc.load_pool(Region::WholeWorld).await.unwrap();
    assert_eq!(pool.len(), 9);

    let settings = QuizSettings::new(30, 5).unwrap();
    let session = svc.start_session(Region::WholeWorld, settings).await.unwrap();
    assert_eq!(session.total(), 9);
}

#[tokio::test]
async fn undersized_region_cannot_start() {
    let svc = service();
    let err = svc
        .start_session(Region::Oceania, QuizSettings::new(10, 5).unwrap())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::NotEnoughEntries {
            available: 3,
            required: 4
        }
    ));
}

#[tokio::test]
async fn missing_region_surfaces_catalog_error() {
    let svc = service();
    let err = svc
        .start_session(Region::Africa, QuizSettings::new(10, 5).unwrap())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::Catalog(CatalogError::NotFound(Region::Africa))
    ));
}

#[tokio::test]
async fn settings_screen_values_are_snapped() {
    let svc = service();
    let mut session = svc
        .start_session_with_choices(Region::Europe, 12, 7)
        .await
        .unwrap();
    // 12 snaps to 10 flags, clamped to the six European entries; 7 snaps to 5 seconds.
    assert_eq!(session.total(), 6);
    assert_eq!(session.remaining_seconds(), 5);

    match session.take_events().first() {
        Some(QuizEvent::QuestionStarted { seconds, total, .. }) => {
            assert_eq!(*seconds, 5);
            assert_eq!(*total, 6);
        }
        other => panic!("unexpected first event: {other:?}"),
    }
}
