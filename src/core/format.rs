//! pt-BR number rendering.
//!
//! Amounts are always shown with exactly two fraction digits, `.` as the
//! thousands separator and `,` as the decimal separator. Currency values get
//! the `R$` symbol followed by a non-breaking space, which is what browsers
//! produce for `Intl.NumberFormat('pt-BR', { currency: 'BRL' })`.

pub const BRL_SYMBOL: &str = "R$";
const NBSP: char = '\u{a0}';

/// Rounds to the cent, half away from zero.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn split_cents(value: f64) -> (bool, u64, u64) {
    let cents = (value.abs() * 100.0).round() as u64;
    let negative = value.is_sign_negative() && cents > 0;
    (negative, cents / 100, cents % 100)
}

fn group_thousands(mut integer: u64) -> String {
    let mut groups = Vec::new();
    loop {
        if integer < 1000 {
            groups.push(integer.to_string());
            break;
        }
        groups.push(format!("{:03}", integer % 1000));
        integer /= 1000;
    }
    groups.reverse();
    groups.join(".")
}

/// `1234.5` → `1.234,50`
pub fn format_decimal(value: f64) -> String {
    let (negative, integer, fraction) = split_cents(value);
    let sign = if negative { "-" } else { "" };
    format!("{}{},{:02}", sign, group_thousands(integer), fraction)
}

/// `1234.5` → `R$ 1.234,50` (with a non-breaking space)
pub fn format_brl(value: f64) -> String {
    let (negative, integer, fraction) = split_cents(value);
    let sign = if negative { "-" } else { "" };
    format!(
        "{}{}{}{},{:02}",
        sign,
        BRL_SYMBOL,
        NBSP,
        group_thousands(integer),
        fraction
    )
}
