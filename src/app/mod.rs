pub mod context;
pub mod error;

pub use context::{AppContext, SharedStore};
pub use error::{Result, TidingsError};
