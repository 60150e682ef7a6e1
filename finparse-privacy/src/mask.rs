//! Value masking for identifiers that survive the masked privacy level.
//!
//! Handles (`local@domain`) keep the first two characters of the local part;
//! runs of four or more digits anywhere else are replaced entirely. The
//! character count is preserved, and masking a masked value is a no-op.

use once_cell::sync::Lazy;
use regex::Regex;

pub const MASK_CHAR: char = '*';

/// Characters of a handle's local part left readable
const VISIBLE_PREFIX: usize = 2;

const MIN_DIGIT_RUN: usize = 4;

fn handle_pattern() -> &'static Regex {
    static PATTERN: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"([\w.*\-]+)@([\w.*\-]+)").expect("Valid regex"));
    &PATTERN
}

fn digit_run_pattern() -> &'static Regex {
    static PATTERN: Lazy<Regex> =
        Lazy::new(|| Regex::new(&format!("[0-9]{{{MIN_DIGIT_RUN},}}")).expect("Valid regex"));
    &PATTERN
}

pub fn mask_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut last = 0;

    for caps in handle_pattern().captures_iter(value) {
        let (Some(whole), Some(local), Some(domain)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        out.push_str(&mask_digit_runs(&value[last..whole.start()]));
        out.push_str(&mask_local_part(local.as_str()));
        out.push('@');
        out.push_str(&mask_digit_runs(domain.as_str()));
        last = whole.end();
    }
    out.push_str(&mask_digit_runs(&value[last..]));
    out
}

/// `"john.doe"` -> `"jo******"`
pub fn mask_local_part(local: &str) -> String {
    local
        .chars()
        .enumerate()
        .map(|(i, c)| if i < VISIBLE_PREFIX { c } else { MASK_CHAR })
        .collect()
}

/// `"ref 303212345678"` -> `"ref ************"`
pub fn mask_digit_runs(text: &str) -> String {
    digit_run_pattern()
        .replace_all(text, |caps: &regex::Captures<'_>| {
            MASK_CHAR.to_string().repeat(caps[0].len())
        })
        .into_owned()
}
