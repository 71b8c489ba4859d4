use rand::{Rng, RngCore};

/// Six-digit numeric code drawn uniformly from 100000..=999999.
pub fn generate_six_digit_code() -> String {
    let mut rng = rand::thread_rng();
    format!("{:06}", rng.gen_range(100000..=999999))
}

/// 32 random bytes rendered as 64 lower-case hex characters.
pub fn generate_unsubscribe_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
