pub mod bracket;
pub mod league;
pub mod match_model;
pub mod trainer;

pub use bracket::*;
pub use league::*;
pub use match_model::*;
pub use trainer::*;
