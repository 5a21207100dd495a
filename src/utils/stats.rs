/// Arithmetic mean. Empty input has a mean of exactly zero.
pub fn mean(values: &[i64]) -> f64 {
    if values.is_empty() {
        return 0.;
    }
    values.iter().map(|v| *v as f64).sum::<f64>() / values.len() as f64
}

/// Sum of all values, zero for empty input.
pub fn total(values: &[i64]) -> i64 {
    values.iter().sum()
}
