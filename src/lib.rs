mod commons;
mod error;
mod extract;

pub use commons::limits;
pub use error::*;
pub use extract::*;

pub type ExtractResult<T> = std::result::Result<T, ExtractError>;
