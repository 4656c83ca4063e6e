use nalgebra::Point3;

/// Minimum Euclidean distance over all point pairs drawn one from each set.
///
/// Returns `None` when either set is empty.
pub fn min_pairwise_distance(first: &[Point3<f64>], second: &[Point3<f64>]) -> Option<f64> {
    first
        .iter()
        .flat_map(|p1| second.iter().map(move |p2| (p1 - p2).norm_squared()))
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(f64::sqrt)
}

/// Rounds a value to a fixed number of decimal places, sending exact halves
/// to the even neighbour.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
