mod change_log;
mod error;
mod scope_map;

pub use crate::scope_map::*;
pub use change_log::*;
pub use error::*;
