/// Maintenance pass errors.
#[derive(Debug, thiserror::Error)]
pub enum MaintenanceError {
    #[error("store rejected the optimized document: {reason}")]
    StoreRejected { reason: String },
}
