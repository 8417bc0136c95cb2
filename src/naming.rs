//! Case conversion for action types and action creator names.
//!
//! Conversion is done by `heck`. Before it runs, apostrophes are dropped
//! (`cat's` → `cats`) and letters are separated from digits (`item2` →
//! `item_2`), except that an ordinal suffix stays with its number (`1st`,
//! `2nd`, `3rd`, `4th`).

use heck::{ToLowerCamelCase, ToShoutySnakeCase};

const APOSTROPHES: [char; 2] = ['\'', '\u{2019}'];
const ORDINAL_SUFFIXES: [&str; 4] = ["st", "nd", "rd", "th"];

fn separate_digits(input: &str) -> String {
    let chars: Vec<char> = input.chars().filter(|c| !APOSTROPHES.contains(c)).collect();
    let mut out = String::with_capacity(chars.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if let Some(&prev) = i.checked_sub(1).and_then(|p| chars.get(p)) {
            let boundary = if prev.is_numeric() {
                c.is_alphabetic() && !starts_with_ordinal_suffix(chars.get(i..).unwrap_or(&[]))
            } else {
                prev.is_alphabetic() && c.is_numeric()
            };
            if boundary {
                out.push('_');
            }
        }
        out.push(c);
    }
    out
}

/// `st`/`nd`/`rd`/`th` not followed by another lowercase letter.
fn starts_with_ordinal_suffix(rest: &[char]) -> bool {
    let [first, second, tail @ ..] = rest else {
        return false;
    };
    let suffix: String = [first.to_ascii_lowercase(), second.to_ascii_lowercase()]
        .iter()
        .collect();
    ORDINAL_SUFFIXES.contains(&suffix.as_str()) && !tail.first().is_some_and(|c| c.is_lowercase())
}

/// `set_userProfile` → `SET_USER_PROFILE`.
pub fn upper_snake_case(input: &str) -> String {
    separate_digits(input).to_shouty_snake_case()
}

/// `SET_USER_PROFILE` → `setUserProfile`.
pub fn lower_camel_case(input: &str) -> String {
    separate_digits(input).to_lower_camel_case()
}

/// Whether `name` contains anything a case conversion would keep.
pub fn has_words(name: &str) -> bool {
    !upper_snake_case(name).is_empty()
}
