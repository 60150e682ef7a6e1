//! Channel keywords recognized in passbook particulars.
//!
//! The table maps the leading keyword of a `Channel` token to a [`Mode`].
//! Direction comes from the token's own `CR`/`DR` suffix when present;
//! keywords that never carry one may imply a direction instead.

use finparse_core::{Direction, Mode};

#[derive(Debug, Clone, Copy)]
struct ChannelRule {
    keyword: &'static str,
    mode: Mode,
    implied: Option<Direction>,
}

const CHANNELS: &[ChannelRule] = &[
    ChannelRule { keyword: "UPI", mode: Mode::Upi, implied: None },
    ChannelRule { keyword: "NEFT", mode: Mode::Neft, implied: None },
    ChannelRule { keyword: "IMPS", mode: Mode::Imps, implied: None },
    ChannelRule { keyword: "ATM", mode: Mode::Atm, implied: None },
    ChannelRule { keyword: "POS", mode: Mode::Pos, implied: None },
    ChannelRule { keyword: "INT", mode: Mode::Interest, implied: None },
    ChannelRule { keyword: "SBINT", mode: Mode::Interest, implied: Some(Direction::Credit) },
    ChannelRule { keyword: "CHQ", mode: Mode::Cheque, implied: None },
    ChannelRule { keyword: "CLG", mode: Mode::Cheque, implied: None },
    ChannelRule { keyword: "SERVICE", mode: Mode::ServiceCharge, implied: Some(Direction::Debit) },
    ChannelRule { keyword: "REV", mode: Mode::Reversal, implied: None },
];

/// A classified channel token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Channel {
    pub mode: Mode,
    /// `CR`/`DR` carried by the token itself
    pub marker: Option<Direction>,
    pub implied: Option<Direction>,
}

pub fn classify(token_text: &str) -> Channel {
    let keyword: String = token_text
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    let (rule, glued) = match rule_for(&keyword) {
        Some(rule) => (Some(rule), None),
        None => match glued_marker(&keyword) {
            Some((rule, marker)) => (Some(rule), Some(marker)),
            None => (None, None),
        },
    };
    Channel {
        mode: rule.map_or(Mode::Unknown, |r| r.mode),
        marker: suffix_marker(token_text).or(glued),
        implied: rule.and_then(|r| r.implied),
    }
}

fn rule_for(keyword: &str) -> Option<&'static ChannelRule> {
    CHANNELS.iter().find(|r| r.keyword == keyword)
}

/// `NEFTCR`: keyword with the marker attached.
fn glued_marker(keyword: &str) -> Option<(&'static ChannelRule, Direction)> {
    let (head, tail) = keyword.split_at(keyword.len().checked_sub(2)?);
    Some((rule_for(head)?, marker_word(tail)?))
}

fn suffix_marker(token_text: &str) -> Option<Direction> {
    let tail = token_text
        .rsplit(|c: char| c == '/' || c.is_whitespace() || c == '-')
        .next()?;
    if token_text.len() == tail.len() {
        // keyword without a separate marker (`SBINT`)
        return None;
    }
    marker_word(tail)
}

/// Standalone direction word: `CR`, `DR`, `Credit`, `Debit`.
pub fn marker_word(word: &str) -> Option<Direction> {
    match word {
        "CR" => Some(Direction::Credit),
        "DR" => Some(Direction::Debit),
        w if w.eq_ignore_ascii_case("credit") => Some(Direction::Credit),
        w if w.eq_ignore_ascii_case("debit") => Some(Direction::Debit),
        _ => None,
    }
}
