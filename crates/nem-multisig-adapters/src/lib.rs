pub mod autocomplete;
pub mod clock;
pub mod config;
pub mod confirmation;
pub mod estimation;
pub mod message;
pub mod wallet;

pub use autocomplete::{AddressBookAdapter, AddressBookEntry};
pub use clock::SystemClockAdapter;
pub use config::AdapterConfig;
pub use confirmation::ConfirmationAdapter;
pub use estimation::{CompletedEstimate, EstimationAdapter, SubmittedEstimate};
pub use message::{MessageAdapter, ShownMessage};
pub use wallet::{WalletAdapter, WalletSnapshot};
