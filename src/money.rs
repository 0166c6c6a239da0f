//! Currency string formatting

/// Formats an amount as a currency string: two fraction digits, comma
/// grouping, symbol prefix, minus sign ahead of the symbol for negatives.
/// Non-finite amounts format as zero. Values that round to 0.00 are unsigned.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let rounded = format!("{:.2}", amount.abs());
    let negative = amount < 0.0 && rounded != "0.00";

    let (int_part, frac_part) = rounded
        .split_once('.')
        .unwrap_or((rounded.as_str(), "00"));
    let grouped = group_thousands(int_part);

    if negative {
        format!("-{symbol}{grouped}.{frac_part}")
    } else {
        format!("{symbol}{grouped}.{frac_part}")
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
