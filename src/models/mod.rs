//! Request and response types

pub mod diabetes;
pub mod exercise;
pub mod food;
pub mod scan;

pub use diabetes::*;
pub use exercise::*;
pub use food::*;
pub use scan::*;
