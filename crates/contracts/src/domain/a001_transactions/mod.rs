pub mod query;
pub mod search_result;

pub use query::*;
pub use search_result::*;
