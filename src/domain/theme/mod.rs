//! Theme aggregate
//!
//! An escape-room experience offered by one office.

pub mod model;
pub mod repository;

pub use model::{NewTheme, Theme, ThemeId, MAX_CAPACITY, MIN_CAPACITY};
pub use repository::ThemeRepository;
