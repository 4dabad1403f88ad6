pub mod client;
pub mod errors;
#[cfg(test)]
pub mod mock_oura_oauth;
pub mod models;
pub mod service;
