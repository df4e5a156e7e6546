//! Office aggregate
//!
//! A branch of the business. Owns its bank accounts as value objects.

pub mod account;
pub mod model;
pub mod repository;

pub use account::Account;
pub use model::{NewOffice, Office, OfficeId};
pub use repository::OfficeRepository;
