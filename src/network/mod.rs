pub mod api;
pub mod gateway;
pub mod transport;
pub mod worker;

#[cfg(test)]
pub(crate) mod testing;

pub use api::ApiClient;
pub use gateway::Gateway;
pub use transport::{HttpTransport, ReqwestTransport};
pub use worker::ApiWorker;
