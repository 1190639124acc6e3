//! Time management for the iterative-deepening search loop.

pub mod time_management;

pub use self::time_management::{Limits, TimeManager};
