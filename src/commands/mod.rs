mod common;
mod extract;
mod init;
mod report;
mod sample;
mod validate;

pub use extract::{ExtractArgs, process_extract};
pub use init::{InitArgs, init_config};
pub use report::{ReportArgs, process_report};
pub use sample::{SampleArgs, generate_sample};
pub use validate::{ValidateArgs, validate_config};
