pub mod api;
pub mod errors;
pub mod models;
pub mod modules;
pub mod schema;

pub(crate) mod macros;

pub use errors::{CustomResult, Error};
pub use modules::models::driver::DriverRecord;
pub use modules::report::builder::{ReportBuilder, ReportSources};
pub use modules::report::lookup::DriverLookup;
pub use modules::report::ranking::RankingView;
pub use modules::report::store::ReportStore;
