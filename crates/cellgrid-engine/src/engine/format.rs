/// Format a number for display.
///
/// Whole numbers print without a fractional part; anything else keeps up to
/// six decimals with trailing zeros removed.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "#NAN!".to_string()
    } else if n.is_infinite() {
        "#INF!".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        let fixed = format!("{:.6}", n);
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Pad or truncate display text to a fixed column width.
pub fn fit_width(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count > width {
        let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    } else {
        format!("{:<width$}", text, width = width)
    }
}
