//! Display primitives shared by command output.

pub mod table;

pub use table::{list_table, render_list};

/// Return the first 8 chars of an id for display.
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
