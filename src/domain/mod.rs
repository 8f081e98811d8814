mod boq_item;
mod extraction_result;
mod file_format;
mod review_log;
mod tender;
mod tender_status;

pub use boq_item::{BoqItem, BoqItemDraft, BoqItemId};
pub use extraction_result::{DEFAULT_CURRENCY, ExtractionResult};
pub use file_format::FileFormat;
pub use review_log::{ReviewAction, ReviewLogEntry, ReviewLogId};
pub use tender::{Tender, TenderId};
pub use tender_status::TenderStatus;
