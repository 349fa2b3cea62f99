//! Columnar storage for the sqlwindow evaluation core: null bitmaps, typed
//! columns and the `Table` page that flows in and out of the window operator.

mod bitmap;
mod column;
mod schema;
mod table;

pub use bitmap::NullBitmap;
pub use column::{A64, Column};
pub use schema::{Field, FieldMode, Schema};
pub use table::Table;
