// ABOUTME: Data movement module
// ABOUTME: Binary COPY dump/load and key-based reconciliation of name rows

pub mod dump;
pub mod load;
pub mod names;
pub mod reconcile;

pub use dump::{build_dump_query, dump_table};
pub use load::{build_load_query, load_table};
pub use names::{stream_names, NameRow, PgNameStore};
pub use reconcile::{reconcile, NameStore, ReconcileSummary, RowOutcome};
