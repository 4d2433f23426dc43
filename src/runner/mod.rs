pub mod console;
pub mod executor;
pub mod fixtures;
pub mod state;

use crate::utils::config::Config;
use anyhow::Result;

pub use executor::ModApiTester;
pub use state::*;

/// Run the full mod API pass described by `config`
pub async fn run_tests(config: Config) -> Result<RunSummary> {
    let mut tester = ModApiTester::with_config(config);
    tester.run_all_tests().await
}
