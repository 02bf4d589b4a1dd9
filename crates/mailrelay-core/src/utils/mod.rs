/// Utility modules
pub mod auth;
pub mod logging;
pub mod validation;

pub use auth::*;
pub use logging::*;
pub use validation::*;
