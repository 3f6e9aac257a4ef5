// HTTP routes
pub mod health;
pub mod properties;
pub mod search;
pub mod stats;
pub mod tools;

pub use health::*;
pub use properties::*;
pub use search::*;
pub use stats::*;
pub use tools::*;
