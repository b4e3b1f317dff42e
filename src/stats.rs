use thiserror::Error;

/// Summary of one measurement series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStatistics {
    pub average: f64,
    pub unbiased_variance: f64,
}

#[derive(Error, Debug)]
#[error("cannot summarize an empty measurement series")]
pub struct EmptySeries;

/// Computes the arithmetic mean and the unbiased sample variance of
/// `data_points`. A single data point has variance 0 (the n-1 divisor is
/// guarded, not statistically meaningful at n=1). An empty series is an
/// error rather than a NaN.
pub fn summarize(data_points: &[f64]) -> Result<SummaryStatistics, EmptySeries> {
    if data_points.is_empty() {
        return Err(EmptySeries);
    }

    let count = data_points.len() as f64;
    let average = data_points.iter().sum::<f64>() / count;

    let unbiased_variance = if data_points.len() > 1 {
        let deviation_sum_of_squares: f64 = data_points
            .iter()
            .map(|v| (v - average) * (v - average))
            .sum();
        deviation_sum_of_squares / (count - 1.0)
    } else {
        0.0
    };

    Ok(SummaryStatistics {
        average,
        unbiased_variance,
    })
}
