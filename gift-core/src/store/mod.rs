pub mod factory;
pub mod repository;

pub use factory::{StoreConfig, StoreFactory, StoreRegistry, TableNames};
pub use repository::{
    CatalogLookup, DEFAULT_RECENT_LIMIT, MAX_CATALOG_IDS, SaleRecordStore, StoreError,
    split_gh_ids,
};
