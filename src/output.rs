//! Output formatting for CLI commands.
//!
//! Tables go to stdout; logs go to stderr (see `init_logging` in
//! `main.rs`), so command output stays pipeable.

use tabled::{Table, Tabled};

/// Print rows as a fixed-width text table.
pub fn print_table<T: Tabled>(items: &[T]) {
    if items.is_empty() {
        println!("No data available");
    } else {
        println!("{}", Table::new(items));
    }
}
