/// API endpoint modules
pub mod send;
