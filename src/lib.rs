pub mod api;
pub mod error;
pub mod report;
pub mod runner;
pub mod utils;

// Re-export common items
pub use report::generate_report;
pub use runner::{run_tests, ModApiTester};
pub use utils::config::Config;
