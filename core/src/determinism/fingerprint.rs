use sha2::{Digest, Sha256};

pub const PATH_SEPARATOR: &str = "/";
pub const FINGERPRINT_LEN: usize = 8;

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut h = Sha256::new();
    h.update(bytes);
    hex::encode(h.finalize())
}

/// Short uppercase fingerprint of a path, taken over the `/`-joined
/// components exactly as given (no filtering).
pub fn path_fingerprint<S: AsRef<str>>(components: &[S]) -> String {
    let joined = components
        .iter()
        .map(|c| c.as_ref())
        .collect::<Vec<_>>()
        .join(PATH_SEPARATOR);
    let digest = sha256_hex(joined.as_bytes());
    digest[..FINGERPRINT_LEN].to_ascii_uppercase()
}
