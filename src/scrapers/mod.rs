pub mod lha;
pub mod seed;
pub mod synthetic;
pub mod traits;
pub mod types;

pub use lha::LhaRates;
pub use synthetic::SyntheticGenerator;
pub use traits::ListingGenerator;
pub use types::SearchParams;
