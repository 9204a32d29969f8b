mod hamper;
mod invoice;
mod line_item;
mod questionnaire;

pub use hamper::{
    Badge, Feasibility, GeneratedHamper, HamperCandidate, HamperItem, PriorityMode,
};
pub use invoice::{
    BankDetails, GiftHamperRecord, Invoice, InvoiceHeader, InvoiceTotals, RecentInvoice,
    SellerInfo,
};
pub use line_item::{LineItem, SHIPPING_ITEM_NAME};
pub use questionnaire::{
    BudgetMode, HeroPreference, MIN_BUDGET, PackagingType, Questionnaire, QuestionnaireError,
};
