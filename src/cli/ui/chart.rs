//! Horizontal bar charts: spending share per category and budget usage.

use tally_domain::{BudgetBars, CategoryShare};

use super::formatting::{format_amount, format_percent};

#[derive(Clone, Copy, Debug)]
pub struct ChartStyle {
    pub width: usize,
    pub fill: char,
}

impl ChartStyle {
    pub fn new(width: usize, plain: bool) -> Self {
        Self {
            width: width.max(1),
            fill: if plain { '#' } else { '█' },
        }
    }

    fn bar(&self, fraction: f64) -> String {
        let cells = (fraction.clamp(0.0, 1.0) * self.width as f64).round() as usize;
        self.fill.to_string().repeat(cells)
    }
}

/// One row per category, bar length proportional to its share of spending.
pub fn share_chart(shares: &[CategoryShare], style: ChartStyle, currency: &str) -> String {
    let label_width = shares
        .iter()
        .map(|share| share.label.chars().count())
        .max()
        .unwrap_or(0);

    shares
        .iter()
        .map(|share| {
            let bar = style.bar(share.percent / 100.0);
            format!(
                "{:<label_width$}  {:<width$}  {:>6}  {}",
                share.label,
                bar,
                format_percent(share.percent),
                format_amount(currency, share.total),
                width = style.width,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Spent, remaining and budget scaled against the largest of the three.
pub fn budget_chart(bars: &BudgetBars, style: ChartStyle, currency: &str) -> String {
    let rows = [
        ("Spent", bars.spent),
        ("Remaining", bars.remaining),
        ("Budget", bars.budget),
    ];
    let scale = rows.iter().map(|(_, value)| *value).fold(0.0_f64, f64::max);

    rows.iter()
        .map(|(label, value)| {
            let fraction = if scale > 0.0 { value / scale } else { 0.0 };
            format!(
                "{:<9}  {:<width$}  {}",
                label,
                style.bar(fraction),
                format_amount(currency, *value),
                width = style.width,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_bars_scale_with_percent() {
        let shares = vec![
            CategoryShare {
                label: "Food".into(),
                total: 30.0,
                percent: 75.0,
            },
            CategoryShare {
                label: "Transport".into(),
                total: 10.0,
                percent: 25.0,
            },
        ];
        let chart = share_chart(&shares, ChartStyle::new(8, true), "$");
        assert_eq!(
            chart,
            "Food       ######     75.0%  $30.00\nTransport  ##         25.0%  $10.00"
        );
    }

    #[test]
    fn overspent_budget_shows_empty_remaining_bar() {
        let bars = BudgetBars {
            spent: 150.0,
            remaining: 0.0,
            budget: 100.0,
        };
        let chart = budget_chart(&bars, ChartStyle::new(6, true), "$");
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines[0], "Spent      ######  $150.00");
        assert_eq!(lines[1], "Remaining          $0.00");
        assert_eq!(lines[2], "Budget     ####    $100.00");
    }

    #[test]
    fn empty_budget_draws_no_bars() {
        let bars = BudgetBars {
            spent: 0.0,
            remaining: 0.0,
            budget: 0.0,
        };
        let chart = budget_chart(&bars, ChartStyle::new(4, true), "$");
        assert!(!chart.contains('#'));
    }
}
