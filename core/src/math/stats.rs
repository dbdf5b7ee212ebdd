/// Population standard-deviation kernels over a window of calibrated samples.
pub struct StatsHelper;

impl StatsHelper {
    pub fn mean(samples: &[f64]) -> Option<f64> {
        if samples.is_empty() {
            return None;
        }
        Some(samples.iter().sum::<f64>() / samples.len() as f64)
    }

    /// `sqrt(mean(x^2) - mean(x)^2)` in a single pass. Cancellation can push
    /// the variance slightly below zero; it is clamped before the root.
    pub fn std_dev_moments(samples: &[f64]) -> Option<f64> {
        if samples.is_empty() {
            return None;
        }
        let (sum, sum_sq) = samples
            .iter()
            .fold((0.0f64, 0.0f64), |(s, sq), &v| (s + v, sq + v * v));
        let n = samples.len() as f64;
        let mean = sum / n;
        let variance = sum_sq / n - mean * mean;
        Some(variance.max(0.0).sqrt())
    }

    /// Mean first, then the mean squared deviation from it.
    pub fn std_dev_direct(samples: &[f64]) -> Option<f64> {
        let mean = Self::mean(samples)?;
        let variance =
            samples.iter().map(|&v| (v - mean) * (v - mean)).sum::<f64>() / samples.len() as f64;
        Some(variance.sqrt())
    }
}
