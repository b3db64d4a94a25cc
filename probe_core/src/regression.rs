//! Ordinary least-squares line fit shared by the estimator.

/// Slope and intercept of `y = slope·x + intercept` over `n` points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub slope: f64,
    pub intercept: f64,
    pub n: usize,
}

/// Normal-equations fit:
///
///   slope     = (nΣxy − ΣxΣy) / (nΣxx − (Σx)²)
///   intercept = (Σy − slope·Σx) / n
///
/// Sums accumulate in input order, so results are reproducible bit-for-bit
/// for a given point order. Returns `None` for fewer than two points or when
/// the denominator is exactly zero.
pub fn least_squares(points: &[(f64, f64)]) -> Option<LineFit> {
    if points.len() < 2 {
        return None;
    }
    let (mut sum_x, mut sum_y, mut sum_xx, mut sum_xy) = (0.0f64, 0.0f64, 0.0f64, 0.0f64);
    for &(x, y) in points {
        sum_x += x;
        sum_y += y;
        sum_xx += x * x;
        sum_xy += x * y;
    }
    let n = points.len() as f64;
    let denom = n * sum_xx - sum_x * sum_x;
    if denom == 0.0 {
        return None;
    }
    let slope = (n * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n;
    Some(LineFit {
        slope,
        intercept,
        n: points.len(),
    })
}
