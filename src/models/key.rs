//! Identity key derivation for boats and crew.

/// Derives a stable identity key from name parts.
///
/// Lowercases letters, keeps alphanumerics, and collapses every
/// other run of characters (spaces, punctuation) into a single `-`.
///
/// ```
/// use u_flotilla::models::derive_key;
///
/// assert_eq!(derive_key(&["Ada", "Lovelace"]), "ada-lovelace");
/// assert_eq!(derive_key(&["  Sea  Breeze! "]), "sea-breeze");
/// ```
pub fn derive_key(parts: &[&str]) -> String {
    let mut key = String::new();
    let mut pending_separator = false;

    for ch in parts.iter().flat_map(|p| p.chars().chain(std::iter::once(' '))) {
        if ch.is_alphanumeric() {
            if pending_separator && !key.is_empty() {
                key.push('-');
            }
            pending_separator = false;
            key.extend(ch.to_lowercase());
        } else {
            pending_separator = true;
        }
    }

    key
}
