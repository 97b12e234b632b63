//! Repository implementations.

pub mod administrator;
pub mod api_key;
pub mod audit_log;
pub mod house;
pub mod notification;
pub mod officer;
pub mod patrol;

pub use administrator::AdministratorRepository;
pub use api_key::ApiKeyRepository;
pub use house::{HouseRepository, HouseStatusEffects};
pub use officer::OfficerRepository;
pub use patrol::{PatrolAnomalyRepository, PatrolScanRepository};
