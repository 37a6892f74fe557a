use base64::{Engine, engine::general_purpose::STANDARD};
use md5::{Digest, Md5};

/// Base64 MD5 digest of `text` followed directly by `description`.
pub fn md5_text_hash(text: &str, description: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(text.as_bytes());
    hasher.update(description.as_bytes());
    STANDARD.encode(hasher.finalize())
}
