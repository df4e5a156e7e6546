//! Admin aggregate
//!
//! Back-office users who log in to manage offices and themes.

pub mod model;
pub mod repository;

pub use model::{Admin, AdminId, AdminRole, NewAdmin};
pub use repository::AdminRepository;
