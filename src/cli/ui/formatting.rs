use crossterm::terminal;

/// `-$1,234.50` style amount with two decimals and thousands grouping.
pub fn format_amount(symbol: &str, value: f64) -> String {
    let body = format!("{:.2}", value.abs());
    let (int_part, frac) = body.split_once('.').unwrap_or((body.as_str(), "00"));
    let sign = if value < 0.0 && body != "0.00" { "-" } else { "" };
    format!("{sign}{symbol}{}.{frac}", group_digits(int_part))
}

pub fn format_percent(percent: f64) -> String {
    format!("{percent:.1}%")
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Columns of the attached terminal, if any.
pub fn terminal_width() -> Option<usize> {
    terminal::size().ok().map(|(cols, _)| cols as usize)
}
