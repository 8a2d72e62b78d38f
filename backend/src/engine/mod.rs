//! Pure standings and playoff computations. Nothing in here performs I/O or
//! logs; callers decide how to report a [`DataError`].

pub mod bracket;
pub mod error;
pub mod standings;

pub use bracket::*;
pub use error::DataError;
pub use standings::*;
