//! Name normalization
//!
//! Folder names and installed-software names are compared only after both have
//! been run through [`normalize`].

/// Separator every space, underscore, period and hyphen is mapped to
pub const SEPARATOR: char = '-';

/// Canonicalize a raw folder or package name into a comparable token.
///
/// Lower-cases every character and maps each of ` `, `_`, `.` and `-` to a
/// single `-`. Nothing else is touched, so the function is idempotent.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            ' ' | '_' | '.' | '-' => SEPARATOR,
            other => other,
        })
        .collect()
}
