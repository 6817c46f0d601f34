//! Presentation of the flight board.
//!
//! The table model in [`table`] is shared by the HTML page in [`html`] and
//! the terminal output in [`terminal`].

pub mod html;
pub mod table;
pub mod terminal;
pub mod time;

pub use html::render_page;
pub use table::{visible_rows, TableRow, MAX_ROWS};
pub use terminal::render_table;
