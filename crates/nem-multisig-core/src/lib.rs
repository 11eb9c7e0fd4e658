pub mod builder;
pub mod config;
pub mod domain;
pub mod error;
pub mod fee;
pub mod form;
pub mod format;
pub mod ports;
pub mod state;
pub mod validation;

pub use builder::modification_request;
pub use config::FormConfig;
pub use domain::{
    ActiveAccount, CandidateAccount, CosignatoryEntry, CosignatoryModification, CosignatoryRef,
    FeeQuote, FeeTicket, MinCosignatoriesModification, ModificationRequest, TimestampMs,
    ValidateRequest, AGGREGATE_MODIFICATION,
};
pub use error::FormError;
pub use fee::{validate_request, Debouncer, FeeTickets};
pub use form::ModificationForm;
pub use format::{
    format_address, parse_leading_int, restore_address, AmountFormat, Separators,
    ADDRESS_LENGTH, MICRO_PER_XEM,
};
pub use ports::{
    AutocompletePort, ClockPort, ConfirmationPayload, ConfirmationPort, EstimationPort,
    MessagePort, PortError, WalletPort,
};
pub use state::{Field, FormSnapshot, FormState};
pub use validation::{
    check_cosignatories, min_cosignatory_flags, self_reference_check, structural_check,
    CosignatoryCheck, MinCosignatoryFlags,
};
