use bigdecimal::BigDecimal;

const CURRENCY_SIGN: &str = "₽";
const GROUP_SEPARATOR: char = '\u{a0}';

/// Render an amount the way the storefront shows prices: thousands grouped
/// with a no-break space, at most two fraction digits (truncated, trailing
/// zeros dropped), followed by the rouble sign.
pub fn format_price(amount: &BigDecimal) -> String {
    let plain = amount.with_scale(2).to_string();
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(digit);
    }

    // "-0" after truncation is just zero.
    let sign = if grouped.chars().all(|c| c == '0') && frac_part.is_empty() {
        ""
    } else {
        sign
    };

    if frac_part.is_empty() {
        format!("{sign}{grouped} {CURRENCY_SIGN}")
    } else {
        format!("{sign}{grouped},{frac_part} {CURRENCY_SIGN}")
    }
}
