use crate::error::SeriesError;

/// Cumulative mean of every prefix: `out[n] = mean(v[0..=n])`.
///
/// Updated incrementally, not over a sliding window.
pub fn running_average(values: &[f64]) -> Result<Vec<f64>, SeriesError> {
    let (&first, rest) = values.split_first().ok_or(SeriesError::Empty)?;

    let mut out = Vec::with_capacity(values.len());
    out.push(first);
    let mut avg = first;
    for (i, &v) in rest.iter().enumerate() {
        let n = (i + 2) as f64;
        avg += (v - avg) / n;
        out.push(avg);
    }
    Ok(out)
}

/// Per-sample change: `out[0] = 0`, `out[n] = v[n] - v[n-1]`.
pub fn first_difference(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    std::iter::once(0.0)
        .chain(values.windows(2).map(|w| w[1] - w[0]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn naive_mean(v: &[f64]) -> f64 {
        v.iter().sum::<f64>() / v.len() as f64
    }

    #[test]
    fn running_average_matches_prefix_mean() {
        let v = [2.0, 4.0, 9.0, 1.0];
        let avg = running_average(&v).unwrap();
        assert_eq!(avg.len(), v.len());
        assert_eq!(avg[0], 2.0);
        assert_eq!(avg[1], 3.0);
        assert_eq!(avg[2], 5.0);
        assert_eq!(avg[3], 4.0);
    }

    #[test]
    fn running_average_rejects_empty_input() {
        assert_eq!(running_average(&[]), Err(SeriesError::Empty));
    }

    #[test]
    fn first_difference_shape() {
        assert_eq!(first_difference(&[]), Vec::<f64>::new());
        assert_eq!(first_difference(&[7.0]), vec![0.0]);
        assert_eq!(first_difference(&[1.0, 4.0, 4.0, 10.0]), vec![0.0, 3.0, 0.0, 6.0]);
    }

    proptest! {
        #[test]
        fn running_average_is_cumulative_mean(v in prop::collection::vec(-1.0e6f64..1.0e6, 1..200)) {
            let avg = running_average(&v).unwrap();
            prop_assert_eq!(avg.len(), v.len());
            for n in 0..v.len() {
                let expected = naive_mean(&v[..=n]);
                prop_assert!((avg[n] - expected).abs() <= 1e-6 * (1.0 + expected.abs()));
            }
        }

        #[test]
        fn first_difference_is_pairwise(v in prop::collection::vec(-1.0e6f64..1.0e6, 0..200)) {
            let diff = first_difference(&v);
            prop_assert_eq!(diff.len(), v.len());
            if !v.is_empty() {
                prop_assert_eq!(diff[0], 0.0);
            }
            for n in 1..v.len() {
                prop_assert_eq!(diff[n], v[n] - v[n - 1]);
            }
        }
    }
}
