//! Database entities module

pub mod account;
pub mod admin;
pub mod office;
pub mod theme;

pub use account::Entity as Account;
pub use admin::Entity as Admin;
pub use office::Entity as Office;
pub use theme::Entity as Theme;
