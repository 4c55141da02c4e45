//! Currency display formatting.
//!
//! Amounts are stored as plain numbers; only display applies the regional
//! format: Indian digit grouping (last three digits, then pairs) with the
//! rupee sign and no decimals.

/// Format an amount as INR, e.g. `₹1,23,456`. Values round to whole rupees.
pub fn format_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let rounded = amount.abs().round();
    let digits = format!("{:.0}", rounded);

    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut parts = Vec::new();
        let head_bytes = head.as_bytes();
        let mut index = head_bytes.len();
        while index > 0 {
            let start = index.saturating_sub(2);
            parts.push(&head[start..index]);
            index = start;
        }
        parts.reverse();
        format!("{},{}", parts.join(","), tail)
    };

    if negative {
        format!("-₹{}", grouped)
    } else {
        format!("₹{}", grouped)
    }
}
