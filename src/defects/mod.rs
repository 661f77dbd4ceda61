//! Defect record model and ingestion.

mod factory;
mod record;
mod severity;
mod stage;
mod store;

pub use factory::DefectFactory;
pub use record::DefectRecord;
pub use severity::Severity;
pub use stage::Stage;
pub use store::{load, save};
