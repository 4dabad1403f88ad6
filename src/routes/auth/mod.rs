pub mod access_token;
pub mod oura_login;

pub use access_token::AccessToken;
pub use oura_login::{oura_callback, oura_login};
