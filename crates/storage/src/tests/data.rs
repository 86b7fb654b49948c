use chrono::{DateTime, Duration, TimeZone, Utc};
use trainlog_domain as domain;

pub static EXERCISE: std::sync::LazyLock<domain::Exercise> =
    std::sync::LazyLock::new(|| domain::Exercise {
        id: "e1".into(),
        name: domain::Name::new("Squat").unwrap(),
        muscle_group: "Legs".to_string(),
        description: "Low bar".to_string(),
    });

pub static EXERCISE_2: std::sync::LazyLock<domain::Exercise> =
    std::sync::LazyLock::new(|| domain::Exercise {
        id: "e2".into(),
        name: domain::Name::new("Pull-up").unwrap(),
        muscle_group: "Back".to_string(),
        description: String::new(),
    });

pub static WORKOUT: std::sync::LazyLock<domain::Workout> =
    std::sync::LazyLock::new(|| domain::Workout {
        id: "w1".into(),
        source_id: None,
        start_time: timestamp(0),
        end_time: None,
        exercises: vec![domain::WorkoutExercise {
            id: EXERCISE.id.clone(),
            name: EXERCISE.name.clone(),
            muscle_group: EXERCISE.muscle_group.clone(),
            sets: vec![set(1, "", 5), set(2, "slow descent", 8)],
        }],
    });

pub fn timestamp(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap() + Duration::minutes(minutes)
}

fn set(number: u32, notes: &str, minutes: i64) -> domain::SetEntry {
    domain::SetEntry {
        set: number,
        weight: domain::Weight::new(100.0).unwrap(),
        reps: domain::Reps::new(5),
        notes: notes.to_string(),
        timestamp: timestamp(minutes),
    }
}
