use crate::{ReadError, UpdateError};

#[allow(async_fn_in_trait)]
pub trait SettingsService {
    async fn get_settings(&self) -> Result<Settings, ReadError>;
    async fn set_settings(&self, settings: Settings) -> Result<Settings, UpdateError>;
}

#[allow(async_fn_in_trait)]
pub trait SettingsRepository {
    async fn read_settings(&self) -> Result<Settings, ReadError>;
    async fn write_settings(&self, settings: Settings) -> Result<Settings, UpdateError>;
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub weight_unit: WeightUnit,
    pub history_order: HistoryOrder,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WeightUnit {
    #[default]
    Kilogram,
    Pound,
}

impl WeightUnit {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            WeightUnit::Kilogram => "kg",
            WeightUnit::Pound => "lb",
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum HistoryOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}
