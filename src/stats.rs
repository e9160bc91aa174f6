//! Descriptive statistics for checking generated noise.
//!
//! The slice functions take a plain `&[f64]` and return `None` on input they
//! cannot summarise (too short, non-finite, zero spread). Central moments
//! are taken in a second pass about a compensated mean.
//!
//! [`WelfordAccumulator`] tracks the same moments over a stream, so a
//! [`Trajectory`](crate::Trajectory) can be summarised without collecting it
//! (see [`Trajectory::moments`](crate::Trajectory::moments)).

/// Arithmetic mean with compensated summation.
///
/// `None` for empty or non-finite input.
///
/// ```
/// use qnoise::stats::mean;
/// assert_eq!(mean(&[0.5, 1.5, -2.0, 4.0]), Some(1.0));
/// ```
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() || !all_finite(data) {
        return None;
    }
    Some(kahan_sum(data) / data.len() as f64)
}

/// Unbiased sample variance (`n − 1` denominator).
///
/// `None` below two samples or for non-finite input.
///
/// ```
/// use qnoise::stats::variance;
/// let v = [1.0, 2.0, 3.0, 4.0];
/// assert!((variance(&v).unwrap() - 5.0 / 3.0).abs() < 1e-12);
/// ```
pub fn variance(data: &[f64]) -> Option<f64> {
    if data.len() < 2 || !all_finite(data) {
        return None;
    }
    let sums = CentralSums::of(data);
    Some(sums.m2 / (sums.n - 1.0))
}

/// Population variance (`n` denominator).
pub fn population_variance(data: &[f64]) -> Option<f64> {
    if data.is_empty() || !all_finite(data) {
        return None;
    }
    let sums = CentralSums::of(data);
    Some(sums.m2 / sums.n)
}

/// Bias-corrected excess kurtosis (G₂).
///
/// Zero for a Gaussian, positive for heavy tails (q-noise with `q > 1`),
/// negative for bounded support (`q < 1`). `None` below four samples, for
/// non-finite input or for zero variance.
///
/// ```
/// use qnoise::stats::kurtosis;
/// let spread: Vec<f64> = (0..20).map(f64::from).collect();
/// assert!(kurtosis(&spread).unwrap() < 0.0);
/// ```
pub fn kurtosis(data: &[f64]) -> Option<f64> {
    if !all_finite(data) {
        return None;
    }
    let sums = CentralSums::of(data);
    excess_kurtosis(sums.n, sums.m2, sums.m4)
}

/// Sample autocorrelation at `lag`, normalised by the full sum of squares.
///
/// ```text
/// r(k) = Σ_{t<n−k} (x_t − x̄)(x_{t+k} − x̄) / Σ_t (x_t − x̄)²
/// ```
///
/// The full-length denominator keeps `|r(k)| ≤ 1`. `None` if
/// `lag >= data.len()`, the input is non-finite, or every value is equal.
///
/// ```
/// use qnoise::stats::autocorrelation;
/// let zigzag = [2.0, -2.0, 2.0, -2.0, 2.0, -2.0];
/// assert!(autocorrelation(&zigzag, 1).unwrap() < -0.8);
/// assert_eq!(autocorrelation(&zigzag, 0), Some(1.0));
/// ```
pub fn autocorrelation(data: &[f64], lag: usize) -> Option<f64> {
    if lag >= data.len() || !all_finite(data) {
        return None;
    }
    let centre = kahan_sum(data) / data.len() as f64;
    let deviations: Vec<f64> = data.iter().map(|x| x - centre).collect();
    let energy: f64 = deviations.iter().map(|d| d * d).sum();
    if energy == 0.0 {
        return None;
    }
    let lagged: f64 = deviations
        .iter()
        .zip(&deviations[lag..])
        .map(|(a, b)| a * b)
        .sum();
    Some(lagged / energy)
}

/// Equal-width histogram normalised to a probability density.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    lower: f64,
    width: f64,
    densities: Vec<f64>,
}

impl Histogram {
    /// Lower edge of the first bin.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Empirical density per bin; integrates to one over the bins.
    pub fn densities(&self) -> &[f64] {
        &self.densities
    }

    /// Midpoint of bin `i`.
    pub fn center(&self, i: usize) -> f64 {
        self.lower + (i as f64 + 0.5) * self.width
    }
}

/// Bins `data` into `bins` equal-width bins spanning `[min, max]`.
///
/// The maximum falls into the last bin. `None` if `bins == 0`, `data` is
/// empty or non-finite, or every value is identical.
///
/// ```
/// use qnoise::stats::histogram;
/// let h = histogram(&[0.0, 0.25, 0.5, 0.75, 1.0], 2).unwrap();
/// assert_eq!(h.densities().len(), 2);
/// let total: f64 = h.densities().iter().map(|d| d * h.width()).sum();
/// assert!((total - 1.0).abs() < 1e-12);
/// ```
pub fn histogram(data: &[f64], bins: usize) -> Option<Histogram> {
    if bins == 0 || data.is_empty() || !all_finite(data) {
        return None;
    }
    let lo = data.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if hi <= lo {
        return None;
    }
    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0_u64; bins];
    for &x in data {
        let idx = (((x - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    let scale = 1.0 / (data.len() as f64 * width);
    Some(Histogram {
        lower: lo,
        width,
        densities: counts.iter().map(|&c| c as f64 * scale).collect(),
    })
}

/// Neumaier compensated sum.
///
/// Reference: Neumaier (1974), *ZAMM* 54(1), pp. 39–51.
pub fn kahan_sum(data: &[f64]) -> f64 {
    let (sum, lost) = data.iter().fold((0.0_f64, 0.0_f64), |(sum, lost), &x| {
        let t = sum + x;
        let err = if sum.abs() >= x.abs() {
            (sum - t) + x
        } else {
            (x - t) + sum
        };
        (t, lost + err)
    });
    sum + lost
}

fn all_finite(data: &[f64]) -> bool {
    data.iter().all(|x| x.is_finite())
}

/// Second and fourth central sums of a finite slice.
struct CentralSums {
    n: f64,
    m2: f64,
    m4: f64,
}

impl CentralSums {
    fn of(data: &[f64]) -> Self {
        let n = data.len() as f64;
        let centre = if data.is_empty() { 0.0 } else { kahan_sum(data) / n };
        let (m2, m4) = data.iter().fold((0.0_f64, 0.0_f64), |(m2, m4), &x| {
            let sq = (x - centre) * (x - centre);
            (m2 + sq, m4 + sq * sq)
        });
        Self { n, m2, m4 }
    }
}

fn excess_kurtosis(n: f64, m2: f64, m4: f64) -> Option<f64> {
    if n < 4.0 || m2 == 0.0 {
        return None;
    }
    let g2 = n * m4 / (m2 * m2) - 3.0;
    Some((n - 1.0) / ((n - 2.0) * (n - 3.0)) * ((n + 1.0) * g2 + 6.0))
}

// ---------------------------------------------------------------------------
// Streaming moments
// ---------------------------------------------------------------------------

/// Single-pass mean, variance and excess kurtosis with O(1) memory.
///
/// Welford's update extended to the fourth moment (Pébay 2008,
/// SAND2008-6212). Collect any `f64` iterator into it:
///
/// ```
/// use qnoise::stats::WelfordAccumulator;
/// let acc: WelfordAccumulator = [1.0, 2.0, 3.0, 4.0].into_iter().collect();
/// assert_eq!(acc.count(), 4);
/// assert_eq!(acc.mean(), Some(2.5));
/// assert!((acc.sample_variance().unwrap() - 5.0 / 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WelfordAccumulator {
    n: u64,
    mean: f64,
    m2: f64,
    m3: f64,
    m4: f64,
}

impl WelfordAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one sample.
    pub fn update(&mut self, x: f64) {
        let before = self.n as f64;
        self.n += 1;
        let n = self.n as f64;
        let d = x - self.mean;
        let dn = d / n;
        let dn2 = dn * dn;
        let t = d * dn * before;
        // Each moment reads the lower ones before they move.
        self.m4 += t * dn2 * (n * n - 3.0 * n + 3.0) + 6.0 * dn2 * self.m2 - 4.0 * dn * self.m3;
        self.m3 += t * dn * (n - 2.0) - 3.0 * dn * self.m2;
        self.m2 += t;
        self.mean += dn;
    }

    pub fn count(&self) -> u64 {
        self.n
    }

    pub fn mean(&self) -> Option<f64> {
        (self.n > 0).then_some(self.mean)
    }

    pub fn sample_variance(&self) -> Option<f64> {
        (self.n >= 2).then(|| self.m2 / (self.n - 1) as f64)
    }

    pub fn population_variance(&self) -> Option<f64> {
        (self.n > 0).then(|| self.m2 / self.n as f64)
    }

    /// Same estimator as [`kurtosis`].
    pub fn kurtosis(&self) -> Option<f64> {
        excess_kurtosis(self.n as f64, self.m2, self.m4)
    }
}

impl Extend<f64> for WelfordAccumulator {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for x in iter {
            self.update(x);
        }
    }
}

impl FromIterator<f64> for WelfordAccumulator {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut acc = Self::new();
        acc.extend(iter);
        acc
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_rejects_empty_and_non_finite() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[0.1, f64::NAN]), None);
        assert_eq!(mean(&[f64::NEG_INFINITY, 2.0]), None);
    }

    #[test]
    fn test_variance_denominators() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert!((variance(&v).unwrap() - 5.0 / 3.0).abs() < 1e-12);
        assert!((population_variance(&v).unwrap() - 1.25).abs() < 1e-12);
        assert_eq!(variance(&[7.0]), None);
        assert_eq!(population_variance(&[]), None);
    }

    #[test]
    fn test_variance_large_offset() {
        // Two-pass central sums stay accurate far from zero.
        let v = [1e9 + 1.0, 1e9 + 2.0, 1e9 + 3.0, 1e9 + 4.0];
        assert!((variance(&v).unwrap() - 5.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_kurtosis_uniform_grid() {
        let grid: Vec<f64> = (0..1000).map(f64::from).collect();
        // Continuous uniform has excess kurtosis −1.2.
        assert!((kurtosis(&grid).unwrap() + 1.2).abs() < 0.01);
    }

    #[test]
    fn test_kurtosis_degenerate() {
        assert_eq!(kurtosis(&[3.0; 10]), None);
        assert_eq!(kurtosis(&[1.0, 2.0, 3.0]), None);
        assert_eq!(kurtosis(&[]), None);
    }

    #[test]
    fn test_autocorrelation_lag_zero_and_bounds() {
        let data = [1.0, 3.0, 2.0, 5.0, 4.0];
        assert_eq!(autocorrelation(&data, 0), Some(1.0));
        assert_eq!(autocorrelation(&data, 5), None);
        assert_eq!(autocorrelation(&[2.0; 4], 1), None);
    }

    #[test]
    fn test_autocorrelation_trend_is_positive() {
        let ramp: Vec<f64> = (0..100).map(f64::from).collect();
        assert!(autocorrelation(&ramp, 1).unwrap() > 0.9);
    }

    #[test]
    fn test_histogram_counts_max_in_last_bin() {
        let h = histogram(&[0.0, 1.0, 2.0, 3.0, 4.0], 4).unwrap();
        assert!((h.width() - 1.0).abs() < 1e-15);
        assert_eq!(h.lower(), 0.0);
        // Bins: [0,1) [1,2) [2,3) [3,4] → 1, 1, 1, 2 of 5 samples.
        let expected = [0.2, 0.2, 0.2, 0.4];
        for (d, e) in h.densities().iter().zip(expected) {
            assert!((d - e).abs() < 1e-12);
        }
        assert!((h.center(0) - 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_histogram_degenerate() {
        assert_eq!(histogram(&[], 10), None);
        assert_eq!(histogram(&[1.0, 2.0], 0), None);
        assert_eq!(histogram(&[1.0, 1.0], 3), None);
        assert_eq!(histogram(&[1.0, f64::NAN], 3), None);
    }

    #[test]
    fn test_kahan_sum_recovers_small_terms() {
        assert_eq!(kahan_sum(&[1e16, 1.0, -1e16]), 1.0);
        assert_eq!(kahan_sum(&[]), 0.0);
    }

    #[test]
    fn test_accumulator_matches_slice_functions() {
        let data = [0.5, -1.2, 3.3, 2.0, -0.7, 1.1, 0.05];
        let acc: WelfordAccumulator = data.iter().copied().collect();
        assert_eq!(acc.count(), 7);
        assert!((acc.mean().unwrap() - mean(&data).unwrap()).abs() < 1e-14);
        assert!((acc.sample_variance().unwrap() - variance(&data).unwrap()).abs() < 1e-13);
        assert!(
            (acc.population_variance().unwrap() - population_variance(&data).unwrap()).abs()
                < 1e-13
        );
        assert!((acc.kurtosis().unwrap() - kurtosis(&data).unwrap()).abs() < 1e-10);
    }

    #[test]
    fn test_accumulator_extend_continues() {
        let mut acc: WelfordAccumulator = [1.0, 2.0].into_iter().collect();
        acc.extend([3.0, 4.0]);
        let whole: WelfordAccumulator = [1.0, 2.0, 3.0, 4.0].into_iter().collect();
        assert_eq!(acc, whole);
    }

    #[test]
    fn test_accumulator_empty() {
        let acc = WelfordAccumulator::new();
        assert_eq!(acc.mean(), None);
        assert_eq!(acc.sample_variance(), None);
        assert_eq!(acc.population_variance(), None);
        assert_eq!(acc.kurtosis(), None);
    }
}
