pub mod oauth;
pub mod oura;
pub mod token_store;
pub mod webhooks;
