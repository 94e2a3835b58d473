//! Combination grouping logic
//!
//! Pure functions over already-loaded rows; no I/O.
//!
//! - [`matcher`]: exact set-equality matching of a combination against groups
//! - [`cartesian`]: full variant matrix from the active values of bound attributes

pub mod cartesian;
pub mod matcher;

pub use cartesian::variant_matrix;
pub use matcher::{GroupIndex, find_matching};
