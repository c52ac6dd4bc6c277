use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Locale preset used by number and date labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LabelLocale {
    #[default]
    JaJp,
    EnUs,
    EsEs,
}

impl LabelLocale {
    fn group_separator(self) -> char {
        match self {
            Self::JaJp | Self::EnUs => ',',
            Self::EsEs => '.',
        }
    }

    fn decimal_separator(self) -> char {
        match self {
            Self::JaJp | Self::EnUs => '.',
            Self::EsEs => ',',
        }
    }

    /// Fewest integer digits before grouping kicks in.
    fn min_grouping_digits(self) -> usize {
        match self {
            Self::JaJp | Self::EnUs => 4,
            Self::EsEs => 5,
        }
    }

    fn full_date_pattern(self) -> &'static str {
        match self {
            Self::JaJp => "%Y/%m/%d",
            Self::EnUs => "%m/%d/%Y",
            Self::EsEs => "%d/%m/%Y",
        }
    }

    fn short_date_pattern(self) -> &'static str {
        match self {
            Self::JaJp | Self::EnUs => "%m/%d",
            Self::EsEs => "%d/%m",
        }
    }
}

/// Fraction digits used by value labels when the caller has no preference.
pub const DEFAULT_MAX_FRACTION_DIGITS: u32 = 3;

/// Formats `value` with at most `max_fraction_digits` decimals, trailing zeros
/// removed and the locale's grouping and decimal separators.
///
/// Rounding is decimal half-away-from-zero, so `0.05` with one digit is `0.1`.
#[must_use]
pub fn format_number(value: f64, max_fraction_digits: u32, locale: LabelLocale) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_owned();
    }

    let plain = match Decimal::from_f64(value) {
        Some(decimal) => decimal
            .round_dp_with_strategy(max_fraction_digits, RoundingStrategy::MidpointAwayFromZero)
            .normalize()
            .to_string(),
        None => trim_fraction(format!("{value:.prec$}", prec = max_fraction_digits as usize)),
    };

    let (negative, digits) = match plain.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, plain.as_str()),
    };
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits, ""));

    let mut out = String::with_capacity(plain.len() + 4);
    if negative && (integer != "0" || !fraction.is_empty()) {
        out.push('-');
    }
    push_grouped(&mut out, integer, locale);
    if !fraction.is_empty() {
        out.push(locale.decimal_separator());
        out.push_str(fraction);
    }
    out
}

/// Formats `value` with the default fraction digits.
#[must_use]
pub fn format_value(value: f64, locale: LabelLocale) -> String {
    format_number(value, DEFAULT_MAX_FRACTION_DIGITS, locale)
}

/// Date with year, e.g. `2024/12/20` for [`LabelLocale::JaJp`].
#[must_use]
pub fn format_date_full(date: NaiveDate, locale: LabelLocale) -> String {
    date.format(locale.full_date_pattern()).to_string()
}

/// Date without year, e.g. `12/20` for [`LabelLocale::JaJp`].
#[must_use]
pub fn format_date_short(date: NaiveDate, locale: LabelLocale) -> String {
    date.format(locale.short_date_pattern()).to_string()
}

/// Labels for consecutive time ticks.
///
/// The year is shown on the first tick and on every tick whose year differs
/// from the previous tick's year; other ticks show month and day only.
/// The rule keys on the previous tick, not on January 1st falling on a tick.
#[must_use]
pub fn time_tick_labels(dates: &[NaiveDate], locale: LabelLocale) -> Vec<String> {
    let mut previous_year = None;
    dates
        .iter()
        .map(|date| {
            let show_year = previous_year != Some(date.year());
            previous_year = Some(date.year());
            if show_year {
                format_date_full(*date, locale)
            } else {
                format_date_short(*date, locale)
            }
        })
        .collect()
}

/// `label: value` row used by tooltips.
#[must_use]
pub fn format_tooltip_row(label: &str, value: f64, locale: LabelLocale) -> String {
    format!("{label}: {}", format_value(value, locale))
}

fn push_grouped(out: &mut String, integer: &str, locale: LabelLocale) {
    if integer.len() < locale.min_grouping_digits() {
        out.push_str(integer);
        return;
    }

    let lead = integer.len() % 3;
    for (index, ch) in integer.chars().enumerate() {
        if index > 0 && (index + 3 - lead) % 3 == 0 {
            out.push(locale.group_separator());
        }
        out.push(ch);
    }
}

fn trim_fraction(text: String) -> String {
    if !text.contains('.') {
        return text;
    }
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouping_depends_on_locale() {
        assert_eq!(format_number(1234.5, 3, LabelLocale::JaJp), "1,234.5");
        assert_eq!(format_number(1234.5, 3, LabelLocale::EsEs), "1234,5");
        assert_eq!(format_number(12345.5, 3, LabelLocale::EsEs), "12.345,5");
        assert_eq!(format_number(1_234_567.0, 0, LabelLocale::EnUs), "1,234,567");
        assert_eq!(format_number(123.0, 0, LabelLocale::EnUs), "123");
    }

    #[test]
    fn rounding_is_half_away_from_zero_and_trimmed() {
        assert_eq!(format_number(42.25, 1, LabelLocale::JaJp), "42.3");
        assert_eq!(format_number(-42.25, 1, LabelLocale::JaJp), "-42.3");
        assert_eq!(format_number(50.0, 1, LabelLocale::JaJp), "50");
        assert_eq!(format_number(-0.01, 1, LabelLocale::JaJp), "0");
    }

    #[test]
    fn year_only_on_first_tick_and_year_change() {
        let dates = [
            NaiveDate::from_ymd_opt(2024, 12, 20).expect("date"),
            NaiveDate::from_ymd_opt(2024, 12, 27).expect("date"),
            NaiveDate::from_ymd_opt(2025, 1, 3).expect("date"),
            NaiveDate::from_ymd_opt(2025, 1, 10).expect("date"),
        ];
        assert_eq!(
            time_tick_labels(&dates, LabelLocale::JaJp),
            vec!["2024/12/20", "12/27", "2025/01/03", "01/10"]
        );
    }
}
