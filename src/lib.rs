pub mod access;
pub mod decimal;
pub mod engine;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod registry;
pub mod state;
pub mod treasury;
pub mod types;

// re-export key types
pub use access::AccessControlRegistry;
pub use decimal::Money;
pub use engine::LendingEngine;
pub use errors::{LendingError, Result};
pub use events::{Event, EventStore};
pub use ledger::CollateralLedger;
pub use registry::LoanRegistry;
pub use state::{ClientView, EngineSnapshot, LedgerView};
pub use treasury::{TransferRecord, Treasury, VaultTreasury};
pub use types::{AccountId, Loan, LoanId, LoanStatus, Role};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
