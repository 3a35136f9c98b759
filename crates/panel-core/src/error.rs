use crate::panel::PanelId;
use thiserror::Error;

/// Everything the configurator can refuse or skip.
///
/// Only `InvalidDimension`, `PanelTooLarge` and `NoFrame` reach the UI; the
/// projection errors are recovered inside a mode switch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("invalid {field}: {value} (must be a finite number above 0 and at most {max})")]
    InvalidDimension {
        field: &'static str,
        value: f32,
        max: f32,
    },
    #[error("panel {field} {value} does not fit the frame ({limit})")]
    PanelTooLarge {
        field: &'static str,
        value: f32,
        limit: f32,
    },
    #[error("no frame has been created yet")]
    NoFrame,
    #[error("panel {0} has fewer than 3 distinct outline points")]
    DegenerateGeometry(PanelId),
    #[error("panel {0} has no counterpart to project")]
    MissingCounterpart(PanelId),
    #[error("unknown panel {0}")]
    UnknownPanel(PanelId),
}

pub type Result<T> = std::result::Result<T, Error>;
