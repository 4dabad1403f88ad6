use base64::{prelude::BASE64_URL_SAFE_NO_PAD, Engine};
use rand_core::RngCore;

/// Random value for the OAuth `state` parameter and its companion cookie.
pub fn generate_csrf_token() -> String {
    let mut bytes = [0u8; 32]; // 256-bit token
    rand_core::OsRng.fill_bytes(&mut bytes);
    BASE64_URL_SAFE_NO_PAD.encode(bytes)
}
