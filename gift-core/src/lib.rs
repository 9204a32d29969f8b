pub mod calculations;
pub mod format;
pub mod history;
pub mod mapping;
pub mod models;
pub mod session;
pub mod store;

pub use mapping::RecordMapping;
pub use models::*;
pub use session::{InvoiceSession, LineItemEdit, SessionError, ShippingCharge};
pub use store::{
    CatalogLookup, SaleRecordStore, StoreConfig, StoreError, StoreFactory, StoreRegistry,
};
