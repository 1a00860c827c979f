//! Command implementations.

pub mod check;
pub mod index;
pub mod validate;

pub use check::execute_check;
pub use index::execute_index;
pub use validate::execute_validate;
