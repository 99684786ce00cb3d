/// Current UTC timestamp in milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a human-readable order code for customer reference.
///
/// Format: `ORD-YYMMDD-XXXX` where `XXXX` is a random base36 token.
/// Not globally unique by construction — unique enough for a single
/// restaurant's daily volume (1.6M combinations per day).
pub fn order_code() -> String {
    use rand::Rng;
    const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let date = chrono::Local::now().format("%y%m%d");
    let mut rng = rand::thread_rng();
    let token: String = (0..4)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("ORD-{}-{}", date, token)
}
