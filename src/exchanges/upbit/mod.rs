pub mod builder;
pub mod connector;
pub mod rest;
pub mod signer;
pub mod validation;

// Re-export main components
pub use builder::{build_connector, UpbitBuilder};
pub use connector::{Account, MarketData, Trading, UpbitConnector};
pub use rest::UpbitRest;
pub use signer::{Claims, UpbitSigner};
pub use validation::{require_uuid_or_identifier, synthesize_identifier, validate_order};
