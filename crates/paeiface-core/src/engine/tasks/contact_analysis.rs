use super::chain_boundaries::{ChainRange, ChainRanges};
use crate::core::models::contact::Contact;
use crate::engine::context::{AnalysisContext, ProvidesResidueGeometry};
use crate::engine::error::EngineError;
use crate::engine::progress::Progress;
use itertools::Itertools;
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Finds every validated cross-chain contact of one interaction.
///
/// Chain pairs are visited in token order (`i < j`), then rows of chain `i`,
/// then columns of chain `j`, so the output order is fully determined by the
/// inputs. A residue pair becomes a contact when its error value classifies
/// into a tier and its minimum atom distance is within the spatial cutoff.
#[instrument(skip_all, name = "contact_analysis_task")]
pub fn run<G: ProvidesResidueGeometry>(
    context: &AnalysisContext<G>,
    ranges: &ChainRanges,
) -> Result<Vec<Contact>, EngineError> {
    check_ranges(ranges, context.matrix.token_count())?;

    let chain_pairs: Vec<(&ChainRange, &ChainRange)> = ranges.iter().tuple_combinations().collect();
    info!(
        chain_pairs = chain_pairs.len(),
        cutoff = context.config.spatial_cutoff(),
        "Analyzing interface contacts."
    );
    context.reporter.report(Progress::TaskStart {
        total_steps: chain_pairs.len() as u64,
    });

    let mut contacts = Vec::new();
    for (chain_a, chain_b) in chain_pairs {
        let found = analyze_chain_pair(context, chain_a, chain_b);
        debug!(
            chain_a = %chain_a.chain_id,
            chain_b = %chain_b.chain_id,
            contacts = found.len(),
            "Chain pair analyzed."
        );
        contacts.extend(found);
        context.reporter.report(Progress::TaskIncrement);
    }

    context.reporter.report(Progress::TaskFinish);
    info!(contacts = contacts.len(), "Contact analysis complete.");
    Ok(contacts)
}

fn check_ranges(ranges: &ChainRanges, tokens: usize) -> Result<(), EngineError> {
    for range in ranges.iter() {
        if range.start > range.end || range.end > tokens {
            return Err(EngineError::IndexOutOfRange {
                chain: range.chain_id.clone(),
                start: range.start,
                end: range.end,
                tokens,
            });
        }
    }
    Ok(())
}

fn analyze_chain_pair<G: ProvidesResidueGeometry>(
    context: &AnalysisContext<G>,
    chain_a: &ChainRange,
    chain_b: &ChainRange,
) -> Vec<Contact> {
    let positions = 1..=chain_a.len();

    #[cfg(not(feature = "parallel"))]
    let rows: Vec<Vec<Contact>> = positions
        .map(|position| scan_row(context, chain_a, chain_b, position))
        .collect();

    #[cfg(feature = "parallel")]
    let rows: Vec<Vec<Contact>> = positions
        .into_par_iter()
        .map(|position| scan_row(context, chain_a, chain_b, position))
        .collect();

    rows.into_iter().flatten().collect()
}

fn scan_row<G: ProvidesResidueGeometry>(
    context: &AnalysisContext<G>,
    chain_a: &ChainRange,
    chain_b: &ChainRange,
    position_a: usize,
) -> Vec<Contact> {
    let row = chain_a.token_of(position_a);
    let cutoff = context.config.spatial_cutoff();
    let mut amino_acid_a = None;
    let mut found = Vec::new();

    for position_b in 1..=chain_b.len() {
        let Some(pae) = context.matrix.value(row, chain_b.token_of(position_b)) else {
            continue;
        };
        let Some(tier) = context.config.classify(pae) else {
            continue;
        };
        let Some(distance) = context.geometry.min_residue_distance(
            &chain_a.chain_id,
            position_a,
            &chain_b.chain_id,
            position_b,
        ) else {
            continue;
        };
        if distance > cutoff {
            continue;
        }

        let aa_a = *amino_acid_a.get_or_insert_with(|| {
            context
                .geometry
                .amino_acid(&chain_a.chain_id, position_a)
                .unwrap_or('X')
        });
        found.push(Contact {
            chain_a: chain_a.chain_id.clone(),
            residue_a: position_a,
            amino_acid_a: aa_a,
            chain_b: chain_b.chain_id.clone(),
            residue_b: position_b,
            amino_acid_b: context
                .geometry
                .amino_acid(&chain_b.chain_id, position_b)
                .unwrap_or('X'),
            pae,
            distance,
            tier,
        });
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::confidence::ConfidenceMatrix;
    use crate::core::models::tier::ConfidenceTier;
    use crate::engine::config::{ContactConfig, ContactConfigBuilder};
    use crate::engine::progress::ProgressReporter;
    use crate::engine::tasks::chain_boundaries;
    use nalgebra::DMatrix;
    use std::collections::HashMap;

    /// Geometry with explicit distances for selected residue pairs and a
    /// fixed fallback for everything else.
    struct TableGeometry {
        chains: Vec<(String, usize)>,
        distances: HashMap<(String, usize, String, usize), f64>,
        fallback: f64,
    }

    impl TableGeometry {
        fn new(chains: &[(&str, usize)], fallback: f64) -> Self {
            Self {
                chains: chains.iter().map(|(c, n)| (c.to_string(), *n)).collect(),
                distances: HashMap::new(),
                fallback,
            }
        }

        fn with_distance(mut self, a: (&str, usize), b: (&str, usize), d: f64) -> Self {
            self.distances
                .insert((a.0.to_string(), a.1, b.0.to_string(), b.1), d);
            self.distances
                .insert((b.0.to_string(), b.1, a.0.to_string(), a.1), d);
            self
        }
    }

    impl ProvidesResidueGeometry for TableGeometry {
        fn chain_lengths(&self) -> Vec<(String, usize)> {
            self.chains.clone()
        }

        fn min_residue_distance(&self, ca: &str, ra: usize, cb: &str, rb: usize) -> Option<f64> {
            Some(
                self.distances
                    .get(&(ca.to_string(), ra, cb.to_string(), rb))
                    .copied()
                    .unwrap_or(self.fallback),
            )
        }

        fn amino_acid(&self, chain: &str, _residue: usize) -> Option<char> {
            Some(if chain == "A" { 'K' } else { 'E' })
        }
    }

    fn labels(chains: &[(&str, usize)]) -> Vec<String> {
        chains
            .iter()
            .flat_map(|(c, n)| std::iter::repeat_n(c.to_string(), *n))
            .collect()
    }

    fn analyze(
        geometry: &TableGeometry,
        matrix: &ConfidenceMatrix,
        config: &ContactConfig,
    ) -> Result<Vec<Contact>, EngineError> {
        let reporter = ProgressReporter::new();
        let context = AnalysisContext::new(geometry, matrix, config, &reporter);
        let ranges = chain_boundaries::run(geometry, matrix)?;
        run(&context, &ranges)
    }

    fn uniform_matrix(chains: &[(&str, usize)], value: f64) -> DMatrix<f64> {
        let n: usize = chains.iter().map(|(_, len)| len).sum();
        DMatrix::from_element(n, n, value)
    }

    #[test]
    fn single_confident_adjacent_pair_yields_one_very_high_contact() {
        let chains = [("A", 3), ("B", 4)];
        let mut pae = uniform_matrix(&chains, 20.0);
        pae[(0, 3)] = 2.5;
        let matrix = ConfidenceMatrix::new(pae, labels(&chains)).unwrap();
        let geometry = TableGeometry::new(&chains, 30.0).with_distance(("A", 1), ("B", 1), 4.0);

        let contacts = analyze(&geometry, &matrix, &ContactConfig::default()).unwrap();

        assert_eq!(contacts.len(), 1);
        let contact = &contacts[0];
        assert_eq!((contact.chain_a.as_str(), contact.residue_a), ("A", 1));
        assert_eq!((contact.chain_b.as_str(), contact.residue_b), ("B", 1));
        assert_eq!((contact.amino_acid_a, contact.amino_acid_b), ('K', 'E'));
        assert_eq!(contact.tier, ConfidenceTier::VeryHigh);
        assert_eq!(contact.pae, 2.5);
        assert_eq!(contact.distance, 4.0);
    }

    #[test]
    fn confident_pair_beyond_cutoff_is_rejected() {
        let chains = [("A", 3), ("B", 4)];
        let mut pae = uniform_matrix(&chains, 20.0);
        pae[(0, 3)] = 2.5;
        let matrix = ConfidenceMatrix::new(pae, labels(&chains)).unwrap();
        let geometry = TableGeometry::new(&chains, 30.0).with_distance(("A", 1), ("B", 1), 6.0);

        let contacts = analyze(&geometry, &matrix, &ContactConfig::default()).unwrap();
        assert!(contacts.is_empty());
    }

    #[test]
    fn distance_exactly_at_cutoff_is_accepted() {
        let chains = [("A", 1), ("B", 1)];
        let matrix = ConfidenceMatrix::new(uniform_matrix(&chains, 4.0), labels(&chains)).unwrap();
        let geometry = TableGeometry::new(&chains, 5.0);

        let contacts = analyze(&geometry, &matrix, &ContactConfig::default()).unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].tier, ConfidenceTier::High);
    }

    #[test]
    fn same_chain_pairs_are_never_reported() {
        let chains = [("A", 3), ("B", 2)];
        let n = 5;
        let pae = DMatrix::from_fn(n, n, |i, j| {
            let same_chain = (i < 3) == (j < 3);
            if same_chain { 0.1 } else { 25.0 }
        });
        let matrix = ConfidenceMatrix::new(pae, labels(&chains)).unwrap();
        let geometry = TableGeometry::new(&chains, 1.0);

        let contacts = analyze(&geometry, &matrix, &ContactConfig::default()).unwrap();
        assert!(contacts.is_empty());
    }

    #[test]
    fn contacts_follow_chain_pair_then_row_then_column_order() {
        let chains = [("A", 2), ("B", 2), ("C", 2)];
        let matrix = ConfidenceMatrix::new(uniform_matrix(&chains, 1.0), labels(&chains)).unwrap();
        let geometry = TableGeometry::new(&chains, 2.0);

        let contacts = analyze(&geometry, &matrix, &ContactConfig::default()).unwrap();
        let keys: Vec<_> = contacts
            .iter()
            .map(|c| (c.chain_a.as_str(), c.residue_a, c.chain_b.as_str(), c.residue_b))
            .collect();

        assert_eq!(
            keys,
            vec![
                ("A", 1, "B", 1),
                ("A", 1, "B", 2),
                ("A", 2, "B", 1),
                ("A", 2, "B", 2),
                ("A", 1, "C", 1),
                ("A", 1, "C", 2),
                ("A", 2, "C", 1),
                ("A", 2, "C", 2),
                ("B", 1, "C", 1),
                ("B", 1, "C", 2),
                ("B", 2, "C", 1),
                ("B", 2, "C", 2),
            ]
        );
    }

    #[test]
    fn matrix_cell_is_read_row_from_first_chain_column_from_second() {
        let chains = [("A", 1), ("B", 1)];
        let pae = DMatrix::from_row_slice(2, 2, &[0.0, 9.0, 1.0, 0.0]);
        let matrix = ConfidenceMatrix::new(pae, labels(&chains)).unwrap();
        let geometry = TableGeometry::new(&chains, 1.0);

        let contacts = analyze(&geometry, &matrix, &ContactConfig::default()).unwrap();
        assert_eq!(contacts[0].pae, 9.0);
        assert_eq!(contacts[0].tier, ConfidenceTier::Low);
    }

    #[test]
    fn tiers_are_consistent_with_ceilings() {
        let chains = [("A", 6), ("B", 6)];
        let n = 12;
        let values = [0.4, 2.999, 3.0, 4.5, 7.99, 11.5, 12.0, 17.3];
        let pae = DMatrix::from_fn(n, n, |i, j| values[(i * 7 + j * 3) % values.len()]);
        let matrix = ConfidenceMatrix::new(pae, labels(&chains)).unwrap();
        let geometry = TableGeometry::new(&chains, 3.5);
        let config = ContactConfig::default();

        let contacts = analyze(&geometry, &matrix, &config).unwrap();
        assert!(!contacts.is_empty());
        for contact in &contacts {
            let ceiling = config.ceiling_for(contact.tier).unwrap();
            assert!(contact.pae < ceiling);
            for &(tier, tighter) in config.tier_ceilings() {
                if tier < contact.tier {
                    assert!(contact.pae >= tighter);
                }
            }
            assert!(contact.distance <= config.spatial_cutoff());
        }
    }

    #[test]
    fn analysis_is_reproducible() {
        let chains = [("A", 5), ("B", 7)];
        let n = 12;
        let pae = DMatrix::from_fn(n, n, |i, j| ((i * 13 + j * 5) % 15) as f64);
        let matrix = ConfidenceMatrix::new(pae, labels(&chains)).unwrap();
        let geometry = TableGeometry::new(&chains, 4.2).with_distance(("A", 2), ("B", 3), 9.0);
        let config = ContactConfig::default();

        let first = analyze(&geometry, &matrix, &config).unwrap();
        let second = analyze(&geometry, &matrix, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn custom_ceilings_and_cutoff_are_honoured() {
        let chains = [("A", 1), ("B", 1)];
        let matrix = ConfidenceMatrix::new(uniform_matrix(&chains, 13.0), labels(&chains)).unwrap();
        let geometry = TableGeometry::new(&chains, 5.5);

        let default = analyze(&geometry, &matrix, &ContactConfig::default()).unwrap();
        assert!(default.is_empty());

        let relaxed = ContactConfigBuilder::new()
            .tier_ceiling(ConfidenceTier::Low, 15.0)
            .spatial_cutoff(6.0)
            .build()
            .unwrap();
        let contacts = analyze(&geometry, &matrix, &relaxed).unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].tier, ConfidenceTier::Low);
    }

    #[test]
    fn misaligned_ranges_are_reported() {
        let matrix = ConfidenceMatrix::new(
            DMatrix::from_element(3, 3, 1.0),
            vec!["A".into(), "A".into(), "B".into()],
        )
        .unwrap();
        let geometry = TableGeometry::new(&[("A", 2), ("B", 2)], 1.0);
        let ranges = ChainRanges::from_ranges(vec![
            ChainRange {
                chain_id: "A".into(),
                start: 0,
                end: 2,
            },
            ChainRange {
                chain_id: "B".into(),
                start: 2,
                end: 4,
            },
        ]);
        let config = ContactConfig::default();
        let reporter = ProgressReporter::new();
        let context = AnalysisContext::new(&geometry, &matrix, &config, &reporter);

        let err = run(&context, &ranges).unwrap_err();
        assert!(matches!(
            err,
            EngineError::IndexOutOfRange { ref chain, end: 4, tokens: 3, .. } if chain == "B"
        ));
    }

    #[test]
    fn analyzer_reports_one_increment_per_chain_pair() {
        use std::sync::Mutex;

        let chains = [("A", 1), ("B", 1), ("C", 1)];
        let matrix = ConfidenceMatrix::new(uniform_matrix(&chains, 20.0), labels(&chains)).unwrap();
        let geometry = TableGeometry::new(&chains, 1.0);
        let config = ContactConfig::default();
        let increments = Mutex::new(0u64);
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if event == Progress::TaskIncrement {
                *increments.lock().unwrap() += 1;
            }
        }));
        let context = AnalysisContext::new(&geometry, &matrix, &config, &reporter);
        let ranges = chain_boundaries::run(&geometry, &matrix).unwrap();

        run(&context, &ranges).unwrap();
        drop(reporter);
        assert_eq!(increments.into_inner().unwrap(), 3);
    }
}
