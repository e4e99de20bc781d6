use std::collections::BTreeMap;

use serde::Serialize;

use super::model::{LaunchRecord, PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Aggregation results
// ---------------------------------------------------------------------------

/// Number of launches recorded at one site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteCount {
    pub site: String,
    pub count: usize,
}

/// Number of launches with one outcome class at a given site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutcomeCount {
    pub outcome_class: u8,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// Pie chart inputs
// ---------------------------------------------------------------------------

/// Launch count per site, for the "All Sites" pie.
///
/// Every record counts toward its site regardless of its outcome class.
/// Entries are ordered by site name.
pub fn success_share_by_site(records: &[LaunchRecord]) -> Vec<SiteCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for rec in records {
        *counts.entry(rec.site.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(site, count)| SiteCount {
            site: site.to_string(),
            count,
        })
        .collect()
}

/// Launch count per outcome class at `site`. Empty when no record matches.
pub fn outcome_share_for_site(records: &[LaunchRecord], site: &str) -> Vec<OutcomeCount> {
    let mut counts: BTreeMap<u8, usize> = BTreeMap::new();
    for rec in records.iter().filter(|r| r.site == site) {
        *counts.entry(rec.outcome_class).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(outcome_class, count)| OutcomeCount {
            outcome_class,
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Scatter chart input
// ---------------------------------------------------------------------------

/// Records whose payload lies in `range` (inclusive), restricted to the
/// selected site unless it is [`SiteSelection::All`]. Table order is kept.
///
/// An inverted range or an unknown site yields an empty result.
pub fn payload_outcome_points<'a>(
    records: &'a [LaunchRecord],
    range: PayloadRange,
    site: &SiteSelection,
) -> Vec<&'a LaunchRecord> {
    records
        .iter()
        .filter(|rec| range.contains(rec.payload_mass_kg))
        .filter(|rec| match site {
            SiteSelection::All => true,
            SiteSelection::Site(s) => rec.site == *s,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;
    use proptest::prelude::*;

    fn three_rows() -> Vec<LaunchRecord> {
        vec![
            record("A", 500.0, 1, "v1.0"),
            record("A", 2000.0, 1, "FT"),
            record("B", 6000.0, 1, "B4"),
        ]
    }

    #[test]
    fn site_share_counts_every_record() {
        let share = success_share_by_site(&three_rows());
        assert_eq!(
            share,
            vec![
                SiteCount { site: "A".into(), count: 2 },
                SiteCount { site: "B".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn site_share_ignores_outcome_class() {
        let records = vec![record("A", 1.0, 0, "FT"), record("A", 2.0, 0, "FT")];
        assert_eq!(
            success_share_by_site(&records),
            vec![SiteCount { site: "A".into(), count: 2 }]
        );
    }

    #[test]
    fn site_share_of_empty_table_is_empty() {
        assert!(success_share_by_site(&[]).is_empty());
    }

    #[test]
    fn outcome_share_for_known_site() {
        let share = outcome_share_for_site(&three_rows(), "A");
        assert_eq!(share, vec![OutcomeCount { outcome_class: 1, count: 2 }]);
    }

    #[test]
    fn outcome_share_splits_classes() {
        let records = vec![
            record("A", 1.0, 0, "FT"),
            record("A", 2.0, 1, "FT"),
            record("A", 3.0, 1, "FT"),
            record("B", 4.0, 0, "FT"),
        ];
        assert_eq!(
            outcome_share_for_site(&records, "A"),
            vec![
                OutcomeCount { outcome_class: 0, count: 1 },
                OutcomeCount { outcome_class: 1, count: 2 },
            ]
        );
    }

    #[test]
    fn outcome_share_for_unknown_site_is_empty() {
        assert!(outcome_share_for_site(&three_rows(), "Nowhere").is_empty());
    }

    #[test]
    fn points_filter_by_range() {
        let records = three_rows();
        let points =
            payload_outcome_points(&records, PayloadRange::new(1000.0, 5000.0), &SiteSelection::All);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].payload_mass_kg, 2000.0);
    }

    #[test]
    fn points_range_is_inclusive_on_both_ends() {
        let records = vec![record("A", 1000.0, 1, "FT"), record("A", 5000.0, 0, "FT")];
        let points =
            payload_outcome_points(&records, PayloadRange::new(1000.0, 5000.0), &SiteSelection::All);
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn points_full_domain_for_all_sites_is_whole_table() {
        let records = three_rows();
        let points =
            payload_outcome_points(&records, PayloadRange::new(0.0, 10000.0), &SiteSelection::All);
        let expected: Vec<&LaunchRecord> = records.iter().collect();
        assert_eq!(points, expected);
    }

    #[test]
    fn points_restricted_to_site() {
        let records = three_rows();
        let points = payload_outcome_points(
            &records,
            PayloadRange::new(0.0, 10000.0),
            &SiteSelection::from_value("B"),
        );
        assert_eq!(points, vec![&records[2]]);
    }

    #[test]
    fn points_with_inverted_range_or_unknown_site_are_empty() {
        let records = three_rows();
        assert!(payload_outcome_points(
            &records,
            PayloadRange::new(5000.0, 1000.0),
            &SiteSelection::All
        )
        .is_empty());
        assert!(payload_outcome_points(
            &records,
            PayloadRange::new(0.0, 10000.0),
            &SiteSelection::from_value("Nowhere")
        )
        .is_empty());
    }

    prop_compose! {
        fn arb_record()(
            site in prop::sample::select(vec!["CCAFS LC-40", "CCAFS SLC-40", "KSC LC-39A", "VAFB SLC-4E"]),
            mass in 0u32..10_000,
            class in 0u8..=1,
            booster in prop::sample::select(vec!["v1.0", "v1.1", "FT", "B4", "B5"]),
        ) -> LaunchRecord {
            record(site, mass as f64, class, booster)
        }
    }

    fn arb_table() -> impl Strategy<Value = Vec<LaunchRecord>> {
        prop::collection::vec(arb_record(), 0..60)
    }

    proptest! {
        /// One entry per distinct site; counts add up to the table size.
        #[test]
        fn prop_site_share_partitions_table(table in arb_table()) {
            let share = success_share_by_site(&table);
            let distinct: std::collections::BTreeSet<&str> =
                table.iter().map(|r| r.site.as_str()).collect();
            prop_assert_eq!(share.len(), distinct.len());
            prop_assert_eq!(share.iter().map(|s| s.count).sum::<usize>(), table.len());
        }

        /// At most two classes; counts add up to the site's rows.
        #[test]
        fn prop_outcome_share_partitions_site(table in arb_table(), pick in any::<prop::sample::Index>()) {
            prop_assume!(!table.is_empty());
            let site = table[pick.index(table.len())].site.clone();
            let share = outcome_share_for_site(&table, &site);
            prop_assert!(share.len() <= 2);
            let rows = table.iter().filter(|r| r.site == site).count();
            prop_assert_eq!(share.iter().map(|s| s.count).sum::<usize>(), rows);
        }

        #[test]
        fn prop_outcome_share_absent_site_is_empty(table in arb_table()) {
            prop_assert!(outcome_share_for_site(&table, "Boca Chica").is_empty());
        }

        /// Exactly the matching records, each once.
        #[test]
        fn prop_points_are_exactly_the_matches(
            table in arb_table(),
            a in 0u32..10_000,
            b in 0u32..10_000,
        ) {
            let (lo, hi) = if a <= b { (a as f64, b as f64) } else { (b as f64, a as f64) };
            let points = payload_outcome_points(&table, PayloadRange::new(lo, hi), &SiteSelection::All);
            prop_assert!(points.iter().all(|r| lo <= r.payload_mass_kg && r.payload_mass_kg <= hi));
            let expected: Vec<&LaunchRecord> = table
                .iter()
                .filter(|r| lo <= r.payload_mass_kg && r.payload_mass_kg <= hi)
                .collect();
            prop_assert_eq!(points.len(), expected.len());
            for (got, want) in points.iter().zip(expected.iter()) {
                prop_assert!(std::ptr::eq(*got, *want));
            }
        }

        #[test]
        fn prop_aggregations_are_idempotent(table in arb_table()) {
            prop_assert_eq!(success_share_by_site(&table), success_share_by_site(&table));
            prop_assert_eq!(
                outcome_share_for_site(&table, "KSC LC-39A"),
                outcome_share_for_site(&table, "KSC LC-39A")
            );
            let range = PayloadRange::new(1000.0, 5000.0);
            prop_assert_eq!(
                payload_outcome_points(&table, range, &SiteSelection::All),
                payload_outcome_points(&table, range, &SiteSelection::All)
            );
        }
    }
}
