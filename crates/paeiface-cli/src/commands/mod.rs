pub mod batch;
pub mod extract;

use paeiface::core::models::contact::ContactSummary;

/// Renders the per-tier breakdown used on every console summary line.
pub(crate) fn tier_breakdown(summary: &ContactSummary) -> String {
    format!(
        "{} (VH:{}, H:{}, M:{}, L:{})",
        summary.total_contacts,
        summary.very_high_count,
        summary.high_count,
        summary.medium_count,
        summary.low_count
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_breakdown_lists_every_tier() {
        let summary = ContactSummary {
            total_contacts: 6,
            very_high_count: 1,
            high_count: 2,
            medium_count: 3,
            low_count: 0,
        };
        assert_eq!(tier_breakdown(&summary), "6 (VH:1, H:2, M:3, L:0)");
    }
}
