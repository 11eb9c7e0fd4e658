use thiserror::Error;

use crate::ports::PortError;

#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    Port(#[from] PortError),
    #[error("cosignatory row {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("cosignatory row {0} cannot be removed")]
    RowNotRemovable(usize),
    #[error("cosignatory row {0} cannot be marked for deletion")]
    RowNotDeletable(usize),
    #[error("cosignatory row {0} is read-only")]
    RowReadOnly(usize),
    #[error("form is not valid")]
    FormInvalid,
    #[error("form is closed")]
    Closed,
}
