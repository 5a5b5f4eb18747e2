use rand::{Rng, distr::Alphanumeric};

/// Length of generated session identifiers.
pub const SESSION_ID_LEN: usize = 32;

pub fn generate_session_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SESSION_ID_LEN)
        .map(char::from)
        .collect()
}

/// Accepts only identifiers shaped like the ones [`generate_session_id`] makes.
pub fn is_valid_session_id(id: &str) -> bool {
    id.len() == SESSION_ID_LEN && id.chars().all(|c| c.is_ascii_alphanumeric())
}
