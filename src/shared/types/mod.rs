pub mod audit;
pub mod errors;

pub use audit::*;
pub use errors::*;
