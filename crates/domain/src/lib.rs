#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::Corrupted(_)) => {
                    log::warn!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    log::error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

mod error;
mod exercise;
mod name;
mod service;
mod session;
mod set;
mod settings;
mod workout;

pub use error::*;
pub use exercise::*;
pub use name::*;
pub use service::*;
pub use session::*;
pub use set::*;
pub use settings::*;
pub use workout::*;
