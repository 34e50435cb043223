/// Arithmetic mean, `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (with Bessel's correction), `0.0` for fewer than two values.
pub fn stdev(values: &[f64]) -> f64 {
    if values.len() <= 1 {
        return 0.0;
    }
    let mean = mean(values);
    let sq_sum = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    (sq_sum / (values.len() - 1) as f64).sqrt()
}

/// Largest value, `NaN` for an empty slice.
pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(f64::NAN)
}

/// `value / max`, where a zero maximum yields `0.0` instead of `NaN`.
pub fn relative_to_max(value: f64, max: f64) -> f64 {
    if max == 0.0 { 0.0 } else { value / max }
}
