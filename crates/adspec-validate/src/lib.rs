pub mod error;
pub mod file;
pub mod probe;
pub mod rule;
pub mod validator;

pub use error::*;
pub use file::*;
pub use probe::*;
pub use rule::*;
pub use validator::*;
