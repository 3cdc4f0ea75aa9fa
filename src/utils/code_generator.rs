//! Short code generation.

use rand::{Rng, distr::Alphanumeric};

/// Number of characters in a generated code.
const CODE_LENGTH: usize = 8;

/// Generates a random short code.
///
/// Draws uniformly from the 62-symbol alphanumeric alphabet (digits plus
/// upper- and lowercase letters), giving roughly 47.6 bits of entropy at 8
/// characters. The generator does not check for collisions; uniqueness is
/// enforced by each shard's constraint on `code`, and a collision surfaces as
/// a write failure.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 8);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(CODE_LENGTH)
        .map(char::from)
        .collect()
}
