//! Exchange rate and conversion arithmetic.
//!
//! Pure `f64` functions. Invalid inputs degrade to 0 instead of failing,
//! so callers never branch on errors here.

/// Exchange rate: how many target units one source unit buys.
///
/// Returns 0 when either price is zero or NaN.
pub fn rate(source_price: f64, target_price: f64) -> f64 {
    if is_falsy(source_price) || is_falsy(target_price) {
        return 0.0;
    }
    source_price / target_price
}

/// Converted amount for `amount` source units at `rate`.
///
/// Returns 0 when either input is NaN. Sign is not checked here.
pub fn output(amount: f64, rate: f64) -> f64 {
    if amount.is_nan() || rate.is_nan() {
        return 0.0;
    }
    amount * rate
}

/// Output as shown in the read-only "receive" field: 6 decimals, or
/// empty when there is nothing to receive.
pub fn format_output(output: f64) -> String {
    if output > 0.0 {
        format!("{output:.6}")
    } else {
        String::new()
    }
}

/// Human-readable rate line, e.g. `1 ETH = 1645.9337 USDC`.
pub fn format_rate(source: &str, target: &str, rate: f64) -> Option<String> {
    if is_falsy(rate) {
        return None;
    }
    Some(format!("1 {source} = {rate:.4} {target}"))
}

/// Unit price for the rate details, e.g. `$1645.9337`.
pub fn format_unit_price(unit_price: f64) -> String {
    format!("${unit_price:.4}")
}

/// Approximate dollar value of the typed amount, e.g. `~$25000.00`.
pub fn usd_estimate(amount_text: &str, unit_price: f64) -> String {
    match super::amount::parse_leading_number(amount_text) {
        Some(amount) => format!("~${:.2}", amount * unit_price),
        None => "~$0.00".to_string(),
    }
}

/// en-US style number: grouped thousands, between `min_decimals` and
/// `max_decimals` fraction digits.
pub fn format_currency(value: f64, min_decimals: usize, max_decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let max_decimals = max_decimals.max(min_decimals);
    let fixed = format!("{:.*}", max_decimals, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut frac = frac_part.trim_end_matches('0').to_string();
    while frac.len() < min_decimals {
        frac.push('0');
    }

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, d) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(char::from(*d));
    }

    let rounds_to_zero = fixed.bytes().all(|b| b == b'0' || b == b'.');
    let sign = if value < 0.0 && !rounds_to_zero { "-" } else { "" };

    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}

/// JavaScript-style falsiness for numbers: 0 and NaN.
fn is_falsy(x: f64) -> bool {
    x == 0.0 || x.is_nan()
}
