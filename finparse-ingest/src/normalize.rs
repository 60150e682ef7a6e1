//! Whitespace and currency-spacing cleanup of raw PDF text.

/// Characters dropped outright (zero-width spaces/joiners, BOM, soft hyphen)
const INVISIBLE: &[char] = &['\u{200B}', '\u{200C}', '\u{200D}', '\u{2060}', '\u{FEFF}', '\u{00AD}'];

const CURRENCY_SYMBOLS: &[char] = &['₹'];

/// Normalize extracted statement text.
///
/// Every Unicode whitespace character (NBSP, figure and narrow spaces,
/// newlines, tabs) becomes a single space, runs are collapsed, a currency
/// symbol is joined to the amount that follows it, and the result is trimmed.
/// Total and idempotent.
pub fn normalize(raw: &str) -> String {
    let visible: String = raw.chars().filter(|c| !INVISIBLE.contains(c)).collect();
    let collapsed = visible.split_whitespace().collect::<Vec<_>>().join(" ");
    join_currency_symbols(&collapsed)
}

/// `"₹ 250"` -> `"₹250"`
fn join_currency_symbols(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if CURRENCY_SYMBOLS.contains(&c) && chars.peek() == Some(&' ') {
            let mut lookahead = chars.clone();
            lookahead.next();
            if lookahead.peek().is_some_and(|n| n.is_ascii_digit()) {
                chars.next();
            }
        }
    }
    out
}

/// Join per-page text the way the extractor hands it over.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(|p| p.as_ref())
        .collect::<Vec<_>>()
        .join("\n")
}
