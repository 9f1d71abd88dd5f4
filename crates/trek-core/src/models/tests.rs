#[cfg(test)]
mod model_tests {
    use jiff::{civil::date, Timestamp};

    use crate::models::{
        Activity, ActivityKind, LeisureCategory, Step, TransportMode, Trip, TripCategory,
    };

    fn create_test_step(sequence_no: u32) -> Step {
        Step {
            id: u64::from(sequence_no) + 100,
            trip_id: 7,
            sequence_no,
            origin: "Chamonix".to_string(),
            destination: "Champex".to_string(),
            walking_time: 6.75,
            walking_distance: 18.5,
            ascent: 1200,
            description: None,
            notes: None,
            accommodation_id: None,
            date: date(2024, 6, 1),
            version: 1,
        }
    }

    fn create_transport(start_hour: i8, duration_minutes: u32) -> Activity {
        Activity {
            id: 1,
            step_id: 101,
            name: "Night train".to_string(),
            start_time: date(2024, 6, 1).at(start_hour, 0, 0, 0),
            price: 49.0,
            notes: None,
            kind: ActivityKind::Transport {
                mode: TransportMode::Train,
                company: Some("SBB".to_string()),
                destination: Some("Zermatt".to_string()),
                duration_minutes,
            },
        }
    }

    #[test]
    fn test_trip_category_parsing() {
        assert_eq!("Coastal".parse::<TripCategory>(), Ok(TripCategory::Coastal));
        assert_eq!(" desert ".parse::<TripCategory>(), Ok(TripCategory::Desert));
        let error = "jungle".parse::<TripCategory>().unwrap_err();
        assert!(error.contains("Invalid trip category: jungle"));
        assert!(error.contains("unclassifiable"));
    }

    #[test]
    fn test_every_variant_round_trips_through_as_str() {
        for mode in TransportMode::ALL {
            assert_eq!(mode.as_str().parse::<TransportMode>(), Ok(*mode));
        }
        for category in LeisureCategory::ALL {
            assert_eq!(category.as_str().parse::<LeisureCategory>(), Ok(*category));
        }
        assert_eq!(TransportMode::ALL.len(), 10);
        assert_eq!(LeisureCategory::ALL.len(), 7);
        assert_eq!(TripCategory::ALL.len(), 6);
    }

    #[test]
    fn test_transport_arrival_time() {
        let transport = create_transport(11, 150);
        assert_eq!(
            transport.arrival_time(),
            Some(date(2024, 6, 1).at(13, 30, 0, 0))
        );
        assert!(transport.is_transport());
    }

    #[test]
    fn test_transport_arrival_crosses_midnight() {
        let transport = create_transport(22, 9 * 60);
        assert_eq!(
            transport.arrival_time().map(|t| t.date()),
            Some(date(2024, 6, 2))
        );
    }

    #[test]
    fn test_leisure_has_no_arrival_time() {
        let leisure = Activity {
            kind: ActivityKind::Leisure {
                category: LeisureCategory::Gastronomy,
                address: None,
            },
            ..create_transport(9, 0)
        };
        assert_eq!(leisure.arrival_time(), None);
        assert!(!leisure.is_transport());
        assert_eq!(leisure.kind.as_str(), "leisure");
    }

    #[test]
    fn test_activity_serializes_with_kind_tag() {
        let json = serde_json::to_value(create_transport(8, 60)).unwrap();
        assert_eq!(json["kind"], "transport");
        assert_eq!(json["mode"], "train");
        assert_eq!(json["duration_minutes"], 60);
    }

    #[test]
    fn test_walking_hours_minutes() {
        let step = create_test_step(1);
        assert_eq!(step.walking_hours_minutes(), (6, 45));
    }

    #[test]
    fn test_trip_duration_counts_steps() {
        let trip = Trip {
            id: 7,
            title: "Tour du Mont Blanc".to_string(),
            country: "France".to_string(),
            category: TripCategory::Mountainous,
            start_date: date(2024, 6, 1),
            notes: None,
            owner: "alice".to_string(),
            total_cost: 0.0,
            total_walking_distance: 0.0,
            created_at: Timestamp::from_second(1640995200).unwrap(),
            updated_at: Timestamp::from_second(1640995200).unwrap(),
            steps: vec![create_test_step(1), create_test_step(2)],
        };
        assert_eq!(trip.duration(), 2);
    }
}
