//! Lexer turning a normalized statement fragment into typed tokens.
//!
//! All token classes live in one ordered alternation. The regex engine takes
//! the leftmost match and, at a given position, the first alternative that
//! matches, so the order below is the classification priority:
//!
//!   cheque marker > channel > date > time > amount > handle > number > word
//!
//! Whitespace produces no token; `/` and `-` outside other tokens are
//! separators. Spans index into the lexed text.

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `Chq:`
    Cheque,
    /// `UPI/DR`, `NEFT CR`, `SBINT`, ...
    Channel,
    /// `01-02-2023`, `05Mar,2024`
    Date,
    /// `10:22:33`, `10:15PM`
    Time,
    /// `1,500.00`, `12,34,567.00`, `₹250`
    Amount,
    /// `name@bank`
    Handle,
    Number,
    Word,
    Slash,
    Hyphen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn text<'a>(&self, src: &'a str) -> &'a str {
        &src[self.start..self.end]
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

const GROUPS: [(&str, TokenKind); 10] = [
    ("cheque", TokenKind::Cheque),
    ("channel", TokenKind::Channel),
    ("date", TokenKind::Date),
    ("time", TokenKind::Time),
    ("amount", TokenKind::Amount),
    ("handle", TokenKind::Handle),
    ("number", TokenKind::Number),
    ("word", TokenKind::Word),
    ("slash", TokenKind::Slash),
    ("hyphen", TokenKind::Hyphen),
];

fn lexer() -> &'static Regex {
    static PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(concat!(
            r"(?P<cheque>\bChq:)",
            r"|(?P<channel>\b(?:(?:UPI|IMPS|ATM|POS|INT|CHQ|CLG)\s?/\s?(?:DR|CR)",
            r"|NEFT[\s/-]?(?:DR|CR)|SBINT|REV|SERVICE\s+CHARGES?)\b)",
            r"|(?P<date>\b(?:\d{2}-\d{2}-\d{4}|\d{1,2}\s?[A-Za-z]{3},\s?\d{4})\b)",
            r"|(?P<time>\b\d{1,2}:\d{2}(?::\d{2})?(?:\s?[AaPp][Mm])?\b)",
            r"|(?P<amount>₹\d[\d,]*(?:\.\d{1,2})?|\b\d{1,3}(?:,\d{2,3})+\.\d{2}\b|\b\d+\.\d{2}\b)",
            r"|(?P<handle>[\w.*\-]+@[\w.\-]+)",
            r"|(?P<number>\b\d+\b)",
            r"|(?P<word>[^\s/\-₹]+)",
            r"|(?P<slash>/)",
            r"|(?P<hyphen>-)",
        ))
        .expect("Valid lexer regex")
    });
    &PATTERN
}

pub fn tokenize(text: &str) -> Vec<Token> {
    lexer()
        .captures_iter(text)
        .filter_map(|caps| {
            GROUPS.iter().find_map(|(name, kind)| {
                caps.name(name).map(|m| Token {
                    kind: *kind,
                    start: m.start(),
                    end: m.end(),
                })
            })
        })
        .collect()
}

/// Cheque marker value: the next token when it is a number or digit-bearing word.
pub fn cheque_value(src: &str, tokens: &[Token], marker: usize) -> Option<Token> {
    tokens.get(marker + 1).copied().filter(|t| match t.kind {
        TokenKind::Number => true,
        TokenKind::Word => t.text(src).chars().any(|c| c.is_ascii_digit()),
        _ => false,
    })
}

/// Source text of the given tokens, gaps between them preserved, whitespace collapsed.
pub fn join_tokens(src: &str, tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut prev_end: Option<usize> = None;
    for t in tokens {
        if let Some(end) = prev_end {
            if t.start > end {
                out.push(' ');
            }
        }
        out.push_str(t.text(src));
        prev_end = Some(t.end);
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split tokens into segments on a separator kind, keeping empty segments.
pub fn split_on<'a>(src: &'a str, tokens: &[Token], sep: TokenKind) -> Vec<&'a str> {
    let mut segments = Vec::new();
    let mut span: Option<(usize, usize)> = None;
    for t in tokens {
        if t.kind == sep {
            segments.push(span.map_or("", |(s, e)| &src[s..e]));
            span = None;
        } else {
            span = Some(match span {
                Some((s, _)) => (s, t.end),
                None => (t.start, t.end),
            });
        }
    }
    segments.push(span.map_or("", |(s, e)| &src[s..e]));
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        tokenize(text).iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_passbook_upi_line() {
        use TokenKind::*;
        let text = "01-02-2023 UPI/DR/303212345678/JOHN DOE/SBIN/**john@okicici/UPI 500.00 1,500.00 Chq: 303212345678";
        assert_eq!(
            kinds(text),
            vec![
                Date, Channel, Slash, Number, Slash, Word, Word, Slash, Word, Slash, Handle,
                Slash, Word, Amount, Amount, Cheque, Number
            ]
        );
        let tokens = tokenize(text);
        assert_eq!(tokens[1].text(text), "UPI/DR");
        assert_eq!(tokens[10].text(text), "**john@okicici");
    }

    #[test]
    fn test_amount_forms() {
        use TokenKind::*;
        assert_eq!(kinds("1500.00"), vec![Amount]);
        assert_eq!(kinds("12,34,567.00"), vec![Amount]);
        assert_eq!(kinds("₹1,250"), vec![Amount]);
        assert_eq!(kinds("303212345678"), vec![Number]);
        assert_eq!(kinds("ABC500.00"), vec![Word]);
    }

    #[test]
    fn test_channel_forms() {
        let text = "NEFT CR-HDFC0000001-ACME CORP-SALARY";
        let tokens = tokenize(text);
        assert_eq!(tokens[0].kind, TokenKind::Channel);
        assert_eq!(tokens[0].text(text), "NEFT CR");
        assert_eq!(tokens[1].kind, TokenKind::Hyphen);

        assert_eq!(kinds("SBINT"), vec![TokenKind::Channel]);
        assert_eq!(kinds("SERVICE CHARGES"), vec![TokenKind::Channel]);
        assert_eq!(kinds("REVERSAL"), vec![TokenKind::Word]);
    }

    #[test]
    fn test_receipt_tokens() {
        use TokenKind::*;
        assert_eq!(
            kinds("05Mar,2024 Paidto Jane ₹250 10:15PM"),
            vec![Date, Word, Word, Amount, Time]
        );
        assert_eq!(kinds("10:22:33"), vec![Time]);
    }

    #[test]
    fn test_cheque_value_follows_marker() {
        let text = "Chq: 000123";
        let tokens = tokenize(text);
        let value = cheque_value(text, &tokens, 0).unwrap();
        assert_eq!(value.text(text), "000123");

        let text = "Chq: 02-02-2023";
        let tokens = tokenize(text);
        assert!(cheque_value(text, &tokens, 0).is_none());
    }

    #[test]
    fn test_split_on_keeps_inner_spaces() {
        let text = "/303212345678/JOHN DOE/SBIN";
        let tokens = tokenize(text);
        assert_eq!(
            split_on(text, &tokens, TokenKind::Slash),
            vec!["", "303212345678", "JOHN DOE", "SBIN"]
        );
    }

    #[test]
    fn test_join_tokens() {
        let text = "ATM/DR  CASH   WDL";
        let tokens = tokenize(text);
        assert_eq!(join_tokens(text, &tokens[1..]), "CASH WDL");
        assert_eq!(join_tokens(text, &[]), "");
    }
}
