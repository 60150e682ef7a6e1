//! Canara Bank passbook / account statement parser (text)
//!
//! Expected extracted text (whitespace already normalized):
//!   Opening Balance 1,000.00
//!   01-02-2023 UPI/DR/303212345678/JOHN DOE/SBIN/**john@okicici/UPI 500.00 500.00 Chq: 303212345678
//!   02-02-2023 NEFT CR-HDFC0000001-ACME CORP-SALARY 10,000.00 10,500.00 Chq:
//!   Page 2 Date Particulars Deposits Withdrawals Balance
//!   ...
//!   Closing Balance 10,500.00
//!
//! Every transaction ends with a `Chq:` marker, which is what the segmenter
//! cuts on. Deposit and withdrawal share one column position in the text, so
//! the amount is found by position (second-to-last currency token).

use finparse_core::{Direction, Mode, Parsed, Policy, SensitivityMap, Transaction, TxnField};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::channel::{self, Channel};
use crate::extract::{verbatim_decimal, AmountPair, Anomaly, Extraction, Extractor, Rejection};
use crate::segment::{balance_region, split_after_anchors, Segmenter, TransactionBlock};
use crate::token::{cheque_value, join_tokens, split_on, tokenize, Token, TokenKind};

pub static SENSITIVITY: SensitivityMap = SensitivityMap::new(&[
    (TxnField::ReferenceId, Policy::Mask),
    (TxnField::IdentityId, Policy::Mask),
    (TxnField::ChequeNo, Policy::Drop),
    (TxnField::RawParticulars, Policy::Mask),
]);

#[derive(Debug, Clone, Copy, Default)]
pub struct CanaraPassbook;

fn opening_re() -> &'static Regex {
    static RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)Opening\s+Balance(?:\s+[\d,]+\.\d+)?").expect("Valid regex")
    });
    &RE
}

fn closing_re() -> &'static Regex {
    static RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i)Closing\s+Balance").expect("Valid regex"));
    &RE
}

fn page_header_re() -> &'static Regex {
    static RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)Page\s*\d+\s*Date\s+Particulars\s+Deposits\s+Withdrawals\s+Balance")
            .expect("Valid regex")
    });
    &RE
}

fn strip_page_headers(region: &str) -> String {
    page_header_re()
        .replace_all(region, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

impl Segmenter for CanaraPassbook {
    fn segment(&self, normalized: &str) -> Vec<TransactionBlock> {
        let Some(region) = balance_region(normalized, opening_re(), closing_re()) else {
            tracing::debug!("opening/closing balance markers not found");
            return Vec::new();
        };
        split_after_anchors(&strip_page_headers(region))
    }
}

impl Extractor for CanaraPassbook {
    fn extract(&self, block: &TransactionBlock) -> Result<Extraction, Rejection> {
        let src = block.text.as_str();
        let tokens = tokenize(src);

        let channel_at = tokens.iter().position(|t| t.is(TokenKind::Channel));
        let channel = channel_at.map(|i| channel::classify(tokens[i].text(src)));
        let direction =
            resolve_direction(src, &tokens, channel).ok_or(Rejection::MissingDirection)?;
        let mode = channel.map_or(Mode::Unknown, |c| c.mode);

        let cheque_at = tokens.iter().position(|t| t.is(TokenKind::Cheque));
        let cheque = cheque_at.and_then(|i| cheque_value(src, &tokens, i));
        let amounts = AmountPair::from_tokens(src, &tokens);

        let mut anomalies: Vec<Anomaly> = amounts.anomaly().into_iter().collect();
        let mut txn = Transaction::new(direction, mode);
        txn.date = first_text(src, &tokens, TokenKind::Date).map(Parsed::verbatim);
        txn.time = first_text(src, &tokens, TokenKind::Time).map(Parsed::verbatim);
        txn.amount = verbatim_decimal(amounts.amount);
        txn.balance = verbatim_decimal(amounts.balance);
        txn.cheque_no = cheque.map(|t| t.text(src).to_string());

        let particulars: Vec<Token> = tokens
            .iter()
            .copied()
            .filter(|t| !is_positional(t, cheque))
            .collect();
        txn.raw_particulars = join_tokens(src, &particulars);

        let after_channel: Vec<Token> = channel_at
            .map(|i| free_text(&tokens[i + 1..], cheque))
            .unwrap_or_default();

        match mode {
            Mode::Upi => upi_fields(src, &tokens, &after_channel, &mut txn, &mut anomalies),
            Mode::Neft => txn.counterparty = neft_counterparty(src, &after_channel, &mut anomalies),
            _ => {
                txn.counterparty = cheque_at.and_then(|i| {
                    let before: Vec<Token> = free_text(&tokens[..i], cheque)
                        .into_iter()
                        .filter(|t| !t.is(TokenKind::Channel))
                        .collect();
                    non_blank(&join_tokens(src, &before))
                })
            }
        }

        Ok(Extraction {
            transaction: txn,
            anomalies,
        })
    }
}

/// Channel's own marker, then a marker carried by any later channel token
/// (`REV UPI/CR`), then a standalone `CR`/`DR` word, then the channel's implied
/// direction. No channel means no direction.
fn resolve_direction(src: &str, tokens: &[Token], first: Option<Channel>) -> Option<Direction> {
    let first = first?;
    first
        .marker
        .or_else(|| {
            tokens
                .iter()
                .filter(|t| t.is(TokenKind::Channel))
                .find_map(|t| channel::classify(t.text(src)).marker)
        })
        .or_else(|| {
            tokens
                .iter()
                .filter(|t| t.is(TokenKind::Word))
                .find_map(|t| channel::marker_word(t.text(src)))
        })
        .or(first.implied)
}

/// Date, amount and cheque tokens: fields read by position, not description.
fn is_positional(token: &Token, cheque: Option<Token>) -> bool {
    matches!(
        token.kind,
        TokenKind::Date | TokenKind::Amount | TokenKind::Cheque
    ) || Some(*token) == cheque
}

fn free_text(tokens: &[Token], cheque: Option<Token>) -> Vec<Token> {
    tokens
        .iter()
        .copied()
        .filter(|t| !is_positional(t, cheque) && !t.is(TokenKind::Time))
        .collect()
}

fn first_text<'a>(src: &'a str, tokens: &[Token], kind: TokenKind) -> Option<&'a str> {
    tokens.iter().find(|t| t.is(kind)).map(|t| t.text(src))
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim_matches(|c: char| c == '/' || c == '-' || c.is_whitespace());
    (!s.is_empty()).then(|| s.to_string())
}

fn is_upi_reference(s: &str) -> bool {
    s.len() == 12 && s.chars().all(|c| c.is_ascii_digit())
}

fn is_bank_code(s: &str) -> bool {
    s.len() == 4 && s.chars().all(|c| c.is_ascii_uppercase())
}

/// `UPI/DR/<reference>/<name>/<bank>/<handle>/...`
fn upi_fields(
    src: &str,
    tokens: &[Token],
    after_channel: &[Token],
    txn: &mut Transaction,
    anomalies: &mut Vec<Anomaly>,
) {
    let mut segments = split_on(src, after_channel, TokenKind::Slash);
    if segments.first().is_some_and(|s| s.trim().is_empty()) {
        segments.remove(0);
    }
    if segments.len() < 2 {
        anomalies.push(Anomaly::ShortPath {
            mode: Mode::Upi,
            segments: segments.len(),
        });
    }

    txn.reference_id = segments
        .first()
        .map(|s| s.trim())
        .filter(|s| is_upi_reference(s))
        .or_else(|| {
            tokens
                .iter()
                .filter(|t| t.is(TokenKind::Number))
                .map(|t| t.text(src))
                .find(|s| is_upi_reference(s))
        })
        .map(str::to_string);
    txn.counterparty = segments.get(1).and_then(|s| non_blank(s));
    txn.bank_code = segments
        .get(2)
        .map(|s| s.trim())
        .filter(|s| is_bank_code(s))
        .map(str::to_string);

    txn.identity_id = first_text(src, tokens, TokenKind::Handle).map(str::to_string);
    if txn.identity_id.is_none() {
        let fallback: Option<String> = segments.get(3).map(|s| {
            s.chars()
                .filter(|c| *c != '-' && !c.is_whitespace())
                .collect()
        });
        if let Some(handle) = fallback.filter(|h| !h.is_empty()) {
            anomalies.push(Anomaly::IdentityFallback);
            txn.identity_id = Some(handle);
        }
    }
}

/// `NEFT CR-<ifsc>-<name>-<narration>`: name is the second-to-last segment.
fn neft_counterparty(
    src: &str,
    after_channel: &[Token],
    anomalies: &mut Vec<Anomaly>,
) -> Option<String> {
    let segments = split_on(src, after_channel, TokenKind::Hyphen);
    if segments.len() < 2 {
        anomalies.push(Anomaly::ShortPath {
            mode: Mode::Neft,
            segments: segments.len(),
        });
        return None;
    }
    non_blank(segments[segments.len() - 2])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    fn extract(text: &str) -> Result<Extraction, Rejection> {
        CanaraPassbook.extract(&TransactionBlock::new(0, text))
    }

    #[test]
    fn test_upi_debit_block() {
        let ex = extract(
            "01-02-2023 UPI/DR/303212345678/JOHN DOE/SBIN/**john@okicici/UPI 10:22:33 500.00 1,500.00 Chq: 303212345678",
        )
        .unwrap();
        let txn = &ex.transaction;
        assert_eq!(txn.direction, Direction::Debit);
        assert_eq!(txn.mode, Mode::Upi);
        assert_eq!(txn.date, Some(Parsed::verbatim("01-02-2023")));
        assert_eq!(txn.time, Some(Parsed::verbatim("10:22:33")));
        assert_eq!(txn.amount, Some(Parsed::verbatim("500.00")));
        assert_eq!(txn.balance, Some(Parsed::verbatim("1,500.00")));
        assert_eq!(txn.reference_id.as_deref(), Some("303212345678"));
        assert_eq!(txn.counterparty.as_deref(), Some("JOHN DOE"));
        assert_eq!(txn.bank_code.as_deref(), Some("SBIN"));
        assert_eq!(txn.identity_id.as_deref(), Some("**john@okicici"));
        assert_eq!(txn.cheque_no.as_deref(), Some("303212345678"));
        assert_eq!(
            txn.raw_particulars,
            "UPI/DR/303212345678/JOHN DOE/SBIN/**john@okicici/UPI 10:22:33"
        );
        assert!(ex.anomalies.is_empty());
    }

    #[test]
    fn test_sparse_upi_block() {
        let ex = extract("01-02-2023 UPI/DR ... /JohnDoe/ ... 500.00 1500.00 Chq:").unwrap();
        let txn = &ex.transaction;
        assert_eq!(txn.direction, Direction::Debit);
        assert_eq!(txn.mode, Mode::Upi);
        assert_eq!(txn.amount, Some(Parsed::verbatim("500.00")));
        assert_eq!(txn.balance, Some(Parsed::verbatim("1500.00")));
        assert_eq!(txn.counterparty.as_deref(), Some("JohnDoe"));
        assert_eq!(txn.reference_id, None);
        assert_eq!(txn.cheque_no, None);
    }

    #[test]
    fn test_identity_fallback_from_path() {
        let ex = extract(
            "03-02-2023 UPI/CR/312345678901/JANE/HDFC/jane-doe okaxis/UPI 250.00 1,750.00 Chq:",
        )
        .unwrap();
        assert_eq!(ex.transaction.direction, Direction::Credit);
        assert_eq!(ex.transaction.identity_id.as_deref(), Some("janedoeokaxis"));
        assert!(ex.anomalies.contains(&Anomaly::IdentityFallback));
    }

    #[test]
    fn test_neft_counterparty() {
        let ex = extract("02-02-2023 NEFT CR-HDFC0000001-ACME CORP-SALARY 10,000.00 11,500.00 Chq:")
            .unwrap();
        let txn = &ex.transaction;
        assert_eq!(txn.direction, Direction::Credit);
        assert_eq!(txn.mode, Mode::Neft);
        assert_eq!(txn.counterparty.as_deref(), Some("ACME CORP"));
        assert_eq!(txn.amount, Some(Parsed::verbatim("10,000.00")));
    }

    #[test]
    fn test_other_mode_counterparty_precedes_cheque() {
        let ex = extract("04-02-2023 ATM/DR CASH WDL MG ROAD 2,000.00 9,500.00 Chq: 000451").unwrap();
        let txn = &ex.transaction;
        assert_eq!(txn.mode, Mode::Atm);
        assert_eq!(txn.direction, Direction::Debit);
        assert_eq!(txn.counterparty.as_deref(), Some("CASH WDL MG ROAD"));
        assert_eq!(txn.cheque_no.as_deref(), Some("000451"));
    }

    #[test]
    fn test_interest_implies_credit() {
        let ex = extract("30-06-2023 SBINT 45.00 9,545.00 Chq:").unwrap();
        assert_eq!(ex.transaction.mode, Mode::Interest);
        assert_eq!(ex.transaction.direction, Direction::Credit);
    }

    #[test]
    fn test_reversal_needs_marker() {
        let ex = extract("05-02-2023 REV UPI CR 500.00 10,000.00 Chq:").unwrap();
        assert_eq!(ex.transaction.mode, Mode::Reversal);
        assert_eq!(ex.transaction.direction, Direction::Credit);

        let ex = extract(
            "05-02-2023 REV UPI/CR/303212345678/JOHN DOE/SBIN/john@okicici/UPI 500.00 10,000.00 Chq:",
        )
        .unwrap();
        assert_eq!(ex.transaction.mode, Mode::Reversal);
        assert_eq!(ex.transaction.direction, Direction::Credit);
        assert_eq!(ex.transaction.amount, Some(Parsed::verbatim("500.00")));

        assert_eq!(
            extract("05-02-2023 REV 500.00 10,000.00 Chq:").unwrap_err(),
            Rejection::MissingDirection
        );
    }

    #[test]
    fn test_neft_without_separator() {
        let ex = extract("02-02-2023 NEFTCR-HDFC0000001-ACME CORP-SALARY 10,000.00 11,500.00 Chq:")
            .unwrap();
        let txn = &ex.transaction;
        assert_eq!(txn.mode, Mode::Neft);
        assert_eq!(txn.direction, Direction::Credit);
        assert_eq!(txn.counterparty.as_deref(), Some("ACME CORP"));
    }

    #[test]
    fn test_unknown_channel_rejected() {
        assert_eq!(
            extract("06-02-2023 SOMETHING ELSE 1.00 2.00 Chq:").unwrap_err(),
            Rejection::MissingDirection
        );
    }

    #[test]
    fn test_positional_amount_heuristic() {
        let ex = extract("07-02-2023 POS/DR SHOP 100.00 900.00 Chq:").unwrap();
        assert_eq!(ex.transaction.amount, Some(Parsed::verbatim("100.00")));
        assert_eq!(ex.transaction.balance, Some(Parsed::verbatim("900.00")));

        let ex = extract("07-02-2023 POS/DR SHOP 900.00 Chq:").unwrap();
        assert_eq!(ex.transaction.amount, None);
        assert_eq!(ex.transaction.balance, Some(Parsed::verbatim("900.00")));
        assert!(ex.anomalies.contains(&Anomaly::UnexpectedAmountCount(1)));
    }

    #[test]
    fn test_segment_statement() {
        let text = normalize(
            "CANARA BANK Statement\nOpening Balance 1,000.00\n\
             01-02-2023 UPI/DR/303212345678/JOHN DOE/SBIN/**john@okicici/UPI 500.00 500.00 Chq: 303212345678\n\
             Page 2 Date Particulars Deposits Withdrawals Balance\n\
             02-02-2023 NEFT CR-HDFC0000001-ACME CORP-SALARY 10,000.00 10,500.00 Chq:\n\
             Closing Balance 10,500.00",
        );
        let blocks = CanaraPassbook.segment(&text);
        assert_eq!(blocks.len(), 2);
        assert!(blocks[1].text.starts_with("02-02-2023 NEFT CR"));
        assert!(!blocks[1].text.contains("Particulars"));
    }

    #[test]
    fn test_segment_without_markers_is_empty() {
        let text = "01-02-2023 UPI/DR/X 500.00 500.00 Chq: 1";
        assert!(CanaraPassbook.segment(text).is_empty());
    }
}
