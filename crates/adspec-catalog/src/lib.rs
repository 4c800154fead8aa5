pub mod catalog;
pub mod rows;
pub mod seed;

pub use catalog::*;
pub use rows::*;
pub use seed::*;
