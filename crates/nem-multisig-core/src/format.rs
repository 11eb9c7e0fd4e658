//! Address and amount formatting.
//!
//! Addresses are shown in groups of six characters joined by `-` and restored
//! to their 40 character canonical form before any validation. Amounts are
//! kept canonically in micro-NEM and shown with locale separators.

use serde::{Deserialize, Serialize};

/// Length of a canonical (base32, undashed) NEM address.
pub const ADDRESS_LENGTH: usize = 40;

pub const MICRO_PER_XEM: u64 = 1_000_000;
const DIVISIBILITY: usize = 6;
const ADDRESS_GROUP: usize = 6;

/// Canonical → display, e.g. `TALICE...` → `TALICE-ROONSJ-...`.
pub fn format_address(canonical: &str) -> String {
    let upper = canonical.to_ascii_uppercase();
    let chars: Vec<char> = upper.chars().collect();
    chars
        .chunks(ADDRESS_GROUP)
        .map(|c| c.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("-")
}

/// Display → canonical. Strips dashes and whitespace and uppercases.
pub fn restore_address(display: &str) -> String {
    display
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Separators {
    pub thousand: char,
    pub decimal: char,
}

impl Default for Separators {
    fn default() -> Self {
        Self {
            thousand: ',',
            decimal: '.',
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AmountFormat {
    separators: Separators,
}

impl AmountFormat {
    pub fn new(separators: Separators) -> Self {
        Self { separators }
    }

    pub fn separators(&self) -> Separators {
        self.separators
    }

    pub fn set_separators(&mut self, separators: Separators) {
        self.separators = separators;
    }

    /// Parses a displayed amount into micro-NEM. Blank input is zero.
    pub fn parse(&self, display: &str) -> Option<u64> {
        let trimmed = display.trim();
        if trimmed.is_empty() {
            return Some(0);
        }

        let mut whole = String::new();
        let mut fraction = String::new();
        let mut seen_decimal = false;
        for c in trimmed.chars() {
            if c == self.separators.decimal {
                if seen_decimal {
                    return None;
                }
                seen_decimal = true;
            } else if c == self.separators.thousand && !seen_decimal {
                continue;
            } else if c.is_ascii_digit() {
                if seen_decimal {
                    fraction.push(c);
                } else {
                    whole.push(c);
                }
            } else {
                return None;
            }
        }
        if fraction.len() > DIVISIBILITY {
            return None;
        }

        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().ok()?
        };
        let fraction: u64 = if fraction.is_empty() {
            0
        } else {
            format!("{fraction:0<width$}", width = DIVISIBILITY)
                .parse()
                .ok()?
        };
        whole.checked_mul(MICRO_PER_XEM)?.checked_add(fraction)
    }

    pub fn format(&self, micro: u64) -> String {
        let whole = (micro / MICRO_PER_XEM).to_string();
        let fraction = micro % MICRO_PER_XEM;

        let mut out = String::with_capacity(whole.len() + DIVISIBILITY + 4);
        for (i, c) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                out.push(self.separators.thousand);
            }
            out.push(c);
        }
        if fraction != 0 {
            out.push(self.separators.decimal);
            let digits = format!("{fraction:0width$}", width = DIVISIBILITY);
            out.push_str(digits.trim_end_matches('0'));
        }
        out
    }

    /// Rewrites a displayed amount typed under `from` separators so it reads
    /// the same under `to`. Characters are swapped in one pass so `,` and `.`
    /// can trade places.
    pub fn reformat(display: &str, from: Separators, to: Separators) -> String {
        display
            .chars()
            .map(|c| {
                if c == from.thousand {
                    to.thousand
                } else if c == from.decimal {
                    to.decimal
                } else {
                    c
                }
            })
            .collect()
    }
}

/// `parseInt(text, 10)`: optional leading whitespace and sign, then the
/// leading run of digits. Anything after the digits is ignored.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: &str = "TALICEROONSJCPHC63F52V6FY3SDMSVAEUGHMB7C";

    #[test]
    fn address_format_and_restore_are_inverse() {
        let display = format_address(ALICE);
        assert_eq!(display, "TALICE-ROONSJ-CPHC63-F52V6F-Y3SDMS-VAEUGH-MB7C");
        assert_eq!(restore_address(&display), ALICE);
    }

    #[test]
    fn restore_tolerates_lowercase_and_spaces() {
        assert_eq!(
            restore_address(" talice-roonsj cphc63-f52v6f-y3sdms-vaeugh-mb7c "),
            ALICE
        );
        assert_eq!(restore_address(""), "");
    }

    #[test]
    fn amount_parse_handles_grouping_and_fraction() {
        let fmt = AmountFormat::default();
        assert_eq!(fmt.parse("1,234.5"), Some(1_234_500_000));
        assert_eq!(fmt.parse("0.000001"), Some(1));
        assert_eq!(fmt.parse(""), Some(0));
        assert_eq!(fmt.parse("1.50"), fmt.parse("1.5"));
        assert_eq!(fmt.parse("1.0000001"), None);
        assert_eq!(fmt.parse("1.2.3"), None);
        assert_eq!(fmt.parse("abc"), None);
    }

    #[test]
    fn amount_format_groups_thousands_and_trims_fraction() {
        let fmt = AmountFormat::default();
        assert_eq!(fmt.format(0), "0");
        assert_eq!(fmt.format(1_234_500_000), "1,234.5");
        assert_eq!(fmt.format(12_000_000), "12");
        assert_eq!(fmt.format(1_000_000_000_000), "1,000,000");
    }

    #[test]
    fn reformat_swaps_separators_in_one_pass() {
        let us = Separators::default();
        let eu = Separators {
            thousand: '.',
            decimal: ',',
        };
        assert_eq!(AmountFormat::reformat("1,234.5", us, eu), "1.234,5");
        let fmt = AmountFormat::new(eu);
        assert_eq!(fmt.parse("1.234,5"), Some(1_234_500_000));
    }

    #[test]
    fn leading_int_follows_parse_int() {
        assert_eq!(parse_leading_int("3"), Some(3));
        assert_eq!(parse_leading_int("  12abc"), Some(12));
        assert_eq!(parse_leading_int("-2"), Some(-2));
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("x1"), None);
        assert_eq!(parse_leading_int("-"), None);
    }
}
