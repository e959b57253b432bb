//! Analysis modules.
//!
//! Aggregation of counter reports into per-language tables, histogram
//! binning, and figure construction.

pub mod aggregator;
pub mod histogram;
pub mod plot;
pub mod table;

pub use aggregator::*;
pub use histogram::*;
pub use plot::*;
pub use table::*;
