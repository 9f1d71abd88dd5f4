//! Tests for the itinerary facade.

use jiff::civil::date;
use tempfile::TempDir;

use super::*;
use crate::{
    error::{ConflictReason, ErrorKind},
    identity::StaticIdentity,
    models::{ActivityKind, LeisureCategory, TransportMode, TripCategory},
    params::{
        AddImage, CreateAccommodation, CreateActivity, CreateTrip, EditStep, Id, InsertStep,
        ReviewDraft, StepData, UpdateActivity, UpdateTrip,
    },
    thread::SourceKind,
};

/// Helper function to create a test itinerary acting as `user`
async fn create_test_itinerary(temp_dir: &TempDir, user: &str) -> Itinerary {
    let db_path = temp_dir.path().join("test.db");
    ItineraryBuilder::new()
        .with_database_path(Some(&db_path))
        .with_identity(StaticIdentity::new(user))
        .build()
        .await
        .expect("Failed to create itinerary")
}

fn trip_params(title: &str) -> CreateTrip {
    CreateTrip {
        title: title.to_string(),
        country: "Switzerland".to_string(),
        category: TripCategory::Mountainous,
        start_date: date(2024, 6, 1),
        notes: None,
    }
}

fn step_params(trip_id: u64, position: u32, origin: &str) -> InsertStep {
    InsertStep {
        trip_id,
        position,
        step: StepData {
            origin: origin.to_string(),
            destination: format!("{origin} Hut"),
            walking_hours: 5,
            walking_minutes: 15,
            walking_distance: 12.5,
            ascent: 800,
            description: None,
            notes: None,
        },
    }
}

/// Creates a trip with `count` steps and returns its ID.
async fn trip_with_steps(itinerary: &Itinerary, count: u32) -> u64 {
    let trip = itinerary
        .create_trip(&trip_params("Haute Route"))
        .await
        .expect("Failed to create trip");
    for position in 1..=count {
        itinerary
            .insert_step(&step_params(trip.id, position, &format!("Stage {position}")))
            .await
            .expect("Failed to insert step");
    }
    trip.id
}

#[tokio::test]
async fn test_anonymous_user_cannot_create_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let itinerary = ItineraryBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .build()
        .await
        .expect("Failed to create itinerary");

    let error = itinerary
        .create_trip(&trip_params("Nobody's trip"))
        .await
        .unwrap_err();
    assert!(matches!(error, TrekError::Unauthenticated));
    assert_eq!(error.kind(), ErrorKind::Forbidden);
}

#[tokio::test]
async fn test_list_trips_is_scoped_to_owner() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let alice = create_test_itinerary(&temp_dir, "alice").await;
    let bob = create_test_itinerary(&temp_dir, "bob").await;

    alice.create_trip(&trip_params("Alps")).await.unwrap();
    bob.create_trip(&trip_params("Alps")).await.unwrap();
    alice.create_trip(&trip_params("Pyrenees")).await.unwrap();

    assert_eq!(alice.list_trips().await.unwrap().len(), 2);
    assert_eq!(bob.list_trips().await.unwrap().len(), 1);

    let error = alice.create_trip(&trip_params("Alps")).await.unwrap_err();
    assert!(matches!(
        error,
        TrekError::Conflict {
            reason: ConflictReason::DuplicateTitle,
            ..
        }
    ));
}

#[tokio::test]
async fn test_other_user_cannot_modify_steps() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let alice = create_test_itinerary(&temp_dir, "alice").await;
    let bob = create_test_itinerary(&temp_dir, "bob").await;
    let trip_id = trip_with_steps(&alice, 2).await;
    let steps = alice.get_steps(&Id { id: trip_id }).await.unwrap();

    let error = bob
        .insert_step(&step_params(trip_id, 1, "Sneaky"))
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Forbidden);

    let error = bob.delete_step(&Id { id: steps[0].id }).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Forbidden);

    let unchanged = alice.get_steps(&Id { id: trip_id }).await.unwrap();
    assert_eq!(unchanged.len(), 2);
}

#[tokio::test]
async fn test_edit_step_with_stale_version() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let itinerary = create_test_itinerary(&temp_dir, "alice").await;
    let trip_id = trip_with_steps(&itinerary, 1).await;
    let step = itinerary.get_steps(&Id { id: trip_id }).await.unwrap()[0].clone();

    let edited = itinerary
        .edit_step(&EditStep {
            id: step.id,
            notes: Some("Bring crampons".to_string()),
            walking_minutes: Some(45),
            expected_version: Some(step.version),
            ..Default::default()
        })
        .await
        .expect("Failed to edit step");
    assert_eq!(edited.version, step.version + 1);
    assert_eq!(edited.notes.as_deref(), Some("Bring crampons"));
    assert_eq!(edited.walking_hours_minutes(), (5, 45));
    assert_eq!(edited.sequence_no, step.sequence_no);

    let error = itinerary
        .edit_step(&EditStep {
            id: step.id,
            notes: Some("Stale write".to_string()),
            expected_version: Some(step.version),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(error.is_retryable());
    assert!(matches!(
        error,
        TrekError::Conflict {
            reason: ConflictReason::StaleVersion { .. },
            ..
        }
    ));

    let current = itinerary
        .get_step(&Id { id: step.id })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(current.notes.as_deref(), Some("Bring crampons"));
}

#[tokio::test]
async fn test_step_overview_for_owner_and_visitor() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let alice = create_test_itinerary(&temp_dir, "alice").await;
    let bob = create_test_itinerary(&temp_dir, "bob").await;
    let trip_id = trip_with_steps(&alice, 3).await;
    let steps = alice.get_steps(&Id { id: trip_id }).await.unwrap();
    let middle = steps[1].id;

    alice
        .add_activity(&CreateActivity {
            step_id: middle,
            name: "Cheese tasting".to_string(),
            start_time: date(2024, 6, 2).at(16, 0, 0, 0),
            price: 18.0,
            notes: None,
            kind: ActivityKind::Leisure {
                category: LeisureCategory::Gastronomy,
                address: None,
            },
        })
        .await
        .unwrap();
    alice
        .write_review(&ReviewDraft {
            step_id: middle,
            rating: 5,
            ..Default::default()
        })
        .await
        .unwrap();
    alice
        .add_image(&AddImage {
            review_id: middle,
            url: "https://img.example/glacier.jpg".to_string(),
        })
        .await
        .unwrap();

    let overview = alice.step_overview(&Id { id: middle }).await.unwrap();
    assert_eq!(overview.trip_title, "Haute Route");
    assert_eq!(overview.sibling_ids, steps.iter().map(|s| s.id).collect::<Vec<_>>());
    assert_eq!(overview.neighbours(), (Some(steps[0].id), Some(steps[2].id)));
    assert_eq!(overview.photo_count, 1);
    assert_eq!(overview.thread.len(), 1);
    assert!(overview.editable);
    assert!(overview.reviewable);

    let visitor_view = bob.step_overview(&Id { id: middle }).await.unwrap();
    assert!(!visitor_view.editable);
}

#[tokio::test]
async fn test_day_thread_through_facade() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let itinerary = create_test_itinerary(&temp_dir, "alice").await;
    let trip_id = trip_with_steps(&itinerary, 3).await;
    let steps = itinerary.get_steps(&Id { id: trip_id }).await.unwrap();

    itinerary
        .add_accommodation(&CreateAccommodation {
            trip_id,
            name: "Cabane de Moiry".to_string(),
            check_in: date(2024, 6, 2).at(17, 0, 0, 0),
            check_out: date(2024, 6, 3).at(8, 0, 0, 0),
            price: 95.0,
        })
        .await
        .unwrap();
    itinerary
        .add_activity(&CreateActivity {
            step_id: steps[2].id,
            name: "Postbus".to_string(),
            start_time: date(2024, 6, 3).at(11, 0, 0, 0),
            price: 12.0,
            notes: None,
            kind: ActivityKind::Transport {
                mode: TransportMode::Bus,
                company: None,
                destination: None,
                duration_minutes: 90,
            },
        })
        .await
        .unwrap();

    let thread = itinerary
        .day_thread(&Id { id: steps[2].id })
        .await
        .unwrap();
    let sources: Vec<SourceKind> = thread.iter().map(|e| e.source).collect();
    assert_eq!(
        sources,
        vec![SourceKind::LodgingCheckOut, SourceKind::TransportDeparture]
    );

    let trip = itinerary
        .get_trip(&Id { id: trip_id })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(trip.total_cost, 107.0);
}

#[tokio::test]
async fn test_update_trip_title() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let alice = create_test_itinerary(&temp_dir, "alice").await;
    let bob = create_test_itinerary(&temp_dir, "bob").await;
    let trip_id = trip_with_steps(&alice, 2).await;
    alice.create_trip(&trip_params("Walker's Haute Route")).await.unwrap();

    let updated = alice
        .update_trip(&UpdateTrip {
            id: trip_id,
            title: Some("Another Title".to_string()),
            ..Default::default()
        })
        .await
        .expect("Failed to update trip");
    assert_eq!(updated.title, "Another Title");
    assert_eq!(updated.country, "Switzerland");
    assert_eq!(updated.duration(), 2);

    let error = alice
        .update_trip(&UpdateTrip {
            id: trip_id,
            title: Some("Walker's Haute Route".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        TrekError::Conflict {
            reason: ConflictReason::DuplicateTitle,
            ..
        }
    ));

    let error = bob
        .update_trip(&UpdateTrip {
            id: trip_id,
            title: Some("Stolen".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Forbidden);

    let error = alice
        .update_trip(&UpdateTrip {
            id: 999,
            title: Some("Ghost".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NotFound);

    let trip = alice.get_trip(&Id { id: trip_id }).await.unwrap().unwrap();
    assert_eq!(trip.title, "Another Title");
}

#[tokio::test]
async fn test_update_activity_refreshes_cost() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let itinerary = create_test_itinerary(&temp_dir, "alice").await;
    let trip_id = trip_with_steps(&itinerary, 1).await;
    let step_id = itinerary.get_steps(&Id { id: trip_id }).await.unwrap()[0].id;

    let activity = itinerary
        .add_activity(&CreateActivity {
            step_id,
            name: "Gornergrat railway".to_string(),
            start_time: date(2024, 6, 1).at(9, 0, 0, 0),
            price: 60.0,
            notes: None,
            kind: ActivityKind::Transport {
                mode: TransportMode::Train,
                company: None,
                destination: Some("Gornergrat".to_string()),
                duration_minutes: 33,
            },
        })
        .await
        .unwrap();

    let updated = itinerary
        .update_activity(&UpdateActivity {
            id: activity.id,
            name: "Gornergrat railway".to_string(),
            start_time: date(2024, 6, 1).at(10, 0, 0, 0),
            price: 45.0,
            notes: Some("Half-fare card".to_string()),
            kind: ActivityKind::Transport {
                mode: TransportMode::Train,
                company: Some("GGB".to_string()),
                destination: Some("Gornergrat".to_string()),
                duration_minutes: 33,
            },
        })
        .await
        .expect("Failed to update activity");
    assert_eq!(updated.id, activity.id);
    assert_eq!(updated.step_id, step_id);
    assert_eq!(updated.price, 45.0);
    assert_eq!(updated.start_time, date(2024, 6, 1).at(10, 0, 0, 0));

    let trip = itinerary
        .get_trip(&Id { id: trip_id })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(trip.total_cost, 45.0);

    let error = itinerary
        .update_activity(&UpdateActivity {
            id: activity.id,
            name: "Gornergrat railway".to_string(),
            start_time: date(2024, 6, 1).at(10, 0, 0, 0),
            price: 45.0,
            notes: None,
            kind: ActivityKind::Leisure {
                category: LeisureCategory::Nature,
                address: None,
            },
        })
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::ValidationFailed);
}
