pub mod client;
pub mod response;

pub use client::ModApiClient;
pub use response::ResponseBody;
