use crate::metrics::DatasetMetrics;

const RULE_WIDTH: usize = 50;

/// Human-readable summary block printed after a seeding run.
pub fn render_summary(metrics: &DatasetMetrics) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = Vec::new();

    lines.push(rule.clone());
    lines.push("Seeded data:".to_string());
    lines.push(format!("   Clubs:        {}", metrics.counts.clubs));
    lines.push(format!("   Events:       {}", metrics.counts.events));
    lines.push(format!("   Tables:       {}", metrics.counts.tables));
    lines.push(format!("   Reservations: {}", metrics.counts.reservations));
    lines.push(format!("   Free tables:  {}", metrics.counts.free_tables));
    lines.push(format!(
        "   Occupancy:    {:.1}%",
        metrics.occupancy_rate * 100.0
    ));
    if metrics.total_guests > 0 {
        lines.push(format!("   Guests:       {}", metrics.total_guests));
    }
    if metrics.revenue_estimate > 0 {
        lines.push(format!("   Revenue est.: {}", metrics.revenue_estimate));
    }
    lines.push(rule);

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use clubseed_core::DatasetSummary;

    use super::*;

    #[test]
    fn renders_counts_and_skips_unmodeled_figures() {
        let metrics = DatasetMetrics {
            counts: DatasetSummary {
                clubs: 5,
                events: 25,
                tables: 500,
                reservations: 225,
                free_tables: 275,
            },
            reserved_tables: 225,
            occupancy_rate: 0.45,
            total_guests: 0,
            revenue_estimate: 0,
        };

        let rendered = render_summary(&metrics);
        assert!(rendered.contains("Tables:       500"));
        assert!(rendered.contains("Free tables:  275"));
        assert!(rendered.contains("Occupancy:    45.0%"));
        assert!(!rendered.contains("Revenue"));
        assert!(rendered.starts_with(&"=".repeat(50)));
    }
}
