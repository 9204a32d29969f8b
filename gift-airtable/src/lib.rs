pub mod factory;
pub mod repository;

pub use factory::AirtableStoreFactory;
pub use repository::{AirtableStore, escape_formula_value};
