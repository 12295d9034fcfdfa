// Document Model Store: pure edit operations over the resume document.
// Every operation takes `&Document` and returns a new `Document`; nothing here does I/O.

pub mod fields;
pub mod intent;
pub mod ops;

pub use intent::EditIntent;
