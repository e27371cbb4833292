//! Error hierarchy: one enum per subsystem plus the umbrella type.

mod learning_error;
mod maintenance_error;
mod store_error;

pub use learning_error::LearningError;
pub use maintenance_error::MaintenanceError;
pub use store_error::StoreError;

/// Umbrella error for all Redpen subsystems.
#[derive(Debug, thiserror::Error)]
pub enum RedpenError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Learning(#[from] LearningError),

    #[error(transparent)]
    Maintenance(#[from] MaintenanceError),
}

pub type RedpenResult<T> = Result<T, RedpenError>;
