use chrono::{DateTime, Utc};
use log::warn;
use trainlog_domain as domain;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ModelError {
    #[error(transparent)]
    Name(#[from] domain::NameError),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub muscle_group: String,
    #[serde(default)]
    pub description: String,
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.to_string(),
            muscle_group: value.muscle_group.clone(),
            description: value.description.clone(),
        }
    }
}

impl TryFrom<Exercise> for domain::Exercise {
    type Error = ModelError;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        Ok(domain::Exercise {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            muscle_group: value.muscle_group,
            description: value.description,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub exercises: Vec<WorkoutExercise>,
}

impl From<&domain::Workout> for Workout {
    fn from(value: &domain::Workout) -> Self {
        Self {
            id: value.id.to_string(),
            source_id: value.source_id.as_ref().map(ToString::to_string),
            start_time: value.start_time,
            end_time: value.end_time,
            exercises: value.exercises.iter().map(WorkoutExercise::from).collect(),
        }
    }
}

impl TryFrom<Workout> for domain::Workout {
    type Error = ModelError;

    fn try_from(value: Workout) -> Result<Self, Self::Error> {
        Ok(domain::Workout {
            id: value.id.into(),
            source_id: value.source_id.map(domain::WorkoutID::from),
            start_time: value.start_time,
            end_time: value.end_time,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::WorkoutExercise::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExercise {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub muscle_group: String,
    #[serde(default)]
    pub sets: Vec<SetEntry>,
}

impl From<&domain::WorkoutExercise> for WorkoutExercise {
    fn from(value: &domain::WorkoutExercise) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.to_string(),
            muscle_group: value.muscle_group.clone(),
            sets: value.sets.iter().map(SetEntry::from).collect(),
        }
    }
}

impl TryFrom<WorkoutExercise> for domain::WorkoutExercise {
    type Error = ModelError;

    fn try_from(value: WorkoutExercise) -> Result<Self, Self::Error> {
        let WorkoutExercise {
            id,
            name,
            muscle_group,
            sets,
        } = value;
        let sets = sets
            .into_iter()
            .filter_map(|set| {
                let weight = set
                    .weight
                    .ok_or(domain::WeightError::Empty)
                    .and_then(domain::Weight::new);
                match weight {
                    Ok(weight) => Some((weight, set)),
                    Err(err) => {
                        warn!("skipping set {} of exercise {id}: {err}", set.set);
                        None
                    }
                }
            })
            .zip(1..)
            .map(|((weight, set), number)| domain::SetEntry {
                set: number,
                weight,
                reps: domain::Reps::new(set.reps),
                notes: set.notes,
                timestamp: set.timestamp,
            })
            .collect();

        Ok(domain::WorkoutExercise {
            id: id.into(),
            name: domain::Name::new(&name)?,
            muscle_group,
            sets,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct SetEntry {
    #[serde(default)]
    pub set: u32,
    #[serde(default)]
    pub weight: Option<f32>,
    #[serde(default)]
    pub reps: u32,
    #[serde(default)]
    pub notes: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&domain::SetEntry> for SetEntry {
    fn from(value: &domain::SetEntry) -> Self {
        Self {
            set: value.set,
            weight: Some(value.weight.into()),
            reps: value.reps.into(),
            notes: value.notes.clone(),
            timestamp: value.timestamp,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub weight_unit: WeightUnit,
    pub history_order: HistoryOrder,
}

impl From<domain::Settings> for Settings {
    fn from(value: domain::Settings) -> Self {
        Self {
            weight_unit: match value.weight_unit {
                domain::WeightUnit::Kilogram => WeightUnit::Kilogram,
                domain::WeightUnit::Pound => WeightUnit::Pound,
            },
            history_order: match value.history_order {
                domain::HistoryOrder::NewestFirst => HistoryOrder::NewestFirst,
                domain::HistoryOrder::OldestFirst => HistoryOrder::OldestFirst,
            },
        }
    }
}

impl From<Settings> for domain::Settings {
    fn from(value: Settings) -> Self {
        Self {
            weight_unit: match value.weight_unit {
                WeightUnit::Kilogram => domain::WeightUnit::Kilogram,
                WeightUnit::Pound => domain::WeightUnit::Pound,
            },
            history_order: match value.history_order {
                HistoryOrder::NewestFirst => domain::HistoryOrder::NewestFirst,
                HistoryOrder::OldestFirst => domain::HistoryOrder::OldestFirst,
            },
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    #[default]
    Kilogram,
    Pound,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HistoryOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}
