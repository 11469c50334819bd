// ABOUTME: PostgreSQL utilities module
// ABOUTME: Exports connection management and table lookups

pub mod connection;
pub mod table;

pub use connection::{connect, open_target};
pub use table::{table_exists, TableRef};
