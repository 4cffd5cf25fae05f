//! Numeric helpers for the Gapminder charts.
//!
//! Everything in this crate is a pure function over plain `f64` collections,
//! independent of how the observations are stored.

/// Linear-interpolation percentiles.
pub mod percentile {
    /// Collect the present, non-NaN values and sort them ascending.
    ///
    /// Accepts both bare `f64` and `Option<f64>` items; `None` and NaN are
    /// treated as missing.
    pub fn sorted_finite<I>(values: I) -> Vec<f64>
    where
        I: IntoIterator,
        I::Item: Into<Option<f64>>,
    {
        let mut out: Vec<f64> = values
            .into_iter()
            .filter_map(Into::<Option<f64>>::into)
            .filter(|v| !v.is_nan())
            .collect();
        out.sort_by(|a, b| a.total_cmp(b));
        out
    }

    /// The `p`-th percentile (0-100) of an already sorted slice.
    ///
    /// rank = p/100 * (n - 1), interpolating between the two neighbouring
    /// order statistics. Returns `None` for an empty slice. `p` is clamped
    /// to [0, 100].
    pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
        if sorted.is_empty() {
            return None;
        }
        let p = p.clamp(0.0, 100.0);
        let rank = p / 100.0 * (sorted.len() - 1) as f64;
        let lo = rank.floor() as usize;
        let hi = (rank.ceil() as usize).min(sorted.len() - 1);
        let frac = rank - lo as f64;
        Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
    }

}

/// Color-scale range selection for the choropleth map.
pub mod color_scale {
    use super::percentile::{percentile, sorted_finite};
    use serde::{Deserialize, Serialize};

    /// Range returned when there is nothing to scale. Deliberately far outside
    /// any real GDP-per-capita distribution.
    pub const FALLBACK_RANGE: ColorScaleRange = ColorScaleRange {
        min: 1_000.0,
        max: 1_000_000_000.0,
    };

    /// A `[min, max]` domain for a sequential color scale.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct ColorScaleRange {
        pub min: f64,
        pub max: f64,
    }

    /// Percentile clamp parameters.
    ///
    /// The lower bound is `max(percentile(low) * low_factor, min)` and the
    /// upper bound is `min(percentile(high) * high_factor, max)`.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct ColorScalePolicy {
        pub low_percentile: f64,
        pub high_percentile: f64,
        pub low_factor: f64,
        pub high_factor: f64,
    }

    impl Default for ColorScalePolicy {
        /// 10th/90th percentiles with 0.1x / 10x headroom.
        fn default() -> Self {
            Self {
                low_percentile: 10.0,
                high_percentile: 90.0,
                low_factor: 0.1,
                high_factor: 10.0,
            }
        }
    }

    impl ColorScalePolicy {
        /// Plain data extent, no clamping.
        pub fn min_max() -> Self {
            Self {
                low_percentile: 0.0,
                high_percentile: 100.0,
                low_factor: 1.0,
                high_factor: 1.0,
            }
        }
    }

    /// Select a color-scale range using the default 10/90 policy.
    pub fn color_scale_range<I>(values: I) -> ColorScaleRange
    where
        I: IntoIterator,
        I::Item: Into<Option<f64>>,
    {
        color_scale_range_with(values, &ColorScalePolicy::default())
    }

    /// Select a color-scale range with an explicit policy.
    ///
    /// Missing entries are dropped first; if nothing is left the
    /// [`FALLBACK_RANGE`] is returned. Never panics.
    pub fn color_scale_range_with<I>(values: I, policy: &ColorScalePolicy) -> ColorScaleRange
    where
        I: IntoIterator,
        I::Item: Into<Option<f64>>,
    {
        let sorted = sorted_finite(values);
        let (Some(&lowest), Some(&highest)) = (sorted.first(), sorted.last()) else {
            log::debug!("color_scale: no values present, using fallback range");
            return FALLBACK_RANGE;
        };

        let p_low = percentile(&sorted, policy.low_percentile).unwrap_or(lowest);
        let p_high = percentile(&sorted, policy.high_percentile).unwrap_or(highest);

        let range = ColorScaleRange {
            min: (p_low * policy.low_factor).max(lowest),
            max: (p_high * policy.high_factor).min(highest),
        };
        log::debug!(
            "color_scale: {} values, p_low={} p_high={} -> [{}, {}]",
            sorted.len(),
            p_low,
            p_high,
            range.min,
            range.max
        );
        range
    }

}

/// GDP quartile buckets.
pub mod quartile {
    use super::percentile::{percentile, sorted_finite};
    use serde::{Deserialize, Serialize};
    use std::fmt;
    use std::str::FromStr;

    /// One of four ordered buckets, lowest first.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
    pub enum Quartile {
        Q1,
        Q2,
        Q3,
        Q4,
    }

    impl Quartile {
        pub const ALL: [Quartile; 4] = [Quartile::Q1, Quartile::Q2, Quartile::Q3, Quartile::Q4];

        pub fn as_str(&self) -> &'static str {
            match self {
                Quartile::Q1 => "Q1",
                Quartile::Q2 => "Q2",
                Quartile::Q3 => "Q3",
                Quartile::Q4 => "Q4",
            }
        }
    }

    impl fmt::Display for Quartile {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    impl FromStr for Quartile {
        type Err = String;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s.trim() {
                "Q1" => Ok(Quartile::Q1),
                "Q2" => Ok(Quartile::Q2),
                "Q3" => Ok(Quartile::Q3),
                "Q4" => Ok(Quartile::Q4),
                other => Err(format!("unknown quartile label: {}", other)),
            }
        }
    }

    /// The 25th/50th/75th percentile cut points of a column.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct QuartileBounds {
        pub q1: f64,
        pub q2: f64,
        pub q3: f64,
    }

    impl QuartileBounds {
        /// Compute bounds over every present value. `None` if there are none.
        pub fn from_values<I>(values: I) -> Option<Self>
        where
            I: IntoIterator,
            I::Item: Into<Option<f64>>,
        {
            let sorted = sorted_finite(values);
            Some(Self {
                q1: percentile(&sorted, 25.0)?,
                q2: percentile(&sorted, 50.0)?,
                q3: percentile(&sorted, 75.0)?,
            })
        }

        /// Bucket a value. Upper bounds are inclusive, so the minimum of the
        /// column always lands in Q1.
        pub fn label(&self, value: f64) -> Quartile {
            if value <= self.q1 {
                Quartile::Q1
            } else if value <= self.q2 {
                Quartile::Q2
            } else if value <= self.q3 {
                Quartile::Q3
            } else {
                Quartile::Q4
            }
        }
    }

}

/// Summary statistics and display formatting for the metric cards.
pub mod summary {
    /// Arithmetic mean of the present values, `None` when there are none.
    pub fn mean<I>(values: I) -> Option<f64>
    where
        I: IntoIterator,
        I::Item: Into<Option<f64>>,
    {
        let (sum, count) = values
            .into_iter()
            .filter_map(Into::<Option<f64>>::into)
            .filter(|v| !v.is_nan())
            .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }

    /// Format with a fixed number of decimals, e.g. `format_fixed(7365.123, 2)` -> "7365.12".
    pub fn format_fixed(value: f64, decimals: usize) -> String {
        format!("{:.*}", decimals, value)
    }

    /// Format an integer with comma thousands separators.
    pub fn format_thousands(value: i64) -> String {
        let digits = value.unsigned_abs().to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        if value < 0 {
            out.push('-');
        }
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        out
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_mean() {
            assert_eq!(mean(vec![1.0, 2.0, 3.0, 6.0]), Some(3.0));
            assert_eq!(mean(vec![Some(4.0), None]), Some(4.0));
            assert_eq!(mean(Vec::<f64>::new()), None);
        }

        #[test]
        fn test_format_fixed() {
            assert_eq!(format_fixed(7215.327081, 2), "7215.33");
            assert_eq!(format_fixed(59.47443936, 2), "59.47");
        }

        #[test]
        fn test_format_thousands() {
            assert_eq!(format_thousands(0), "0");
            assert_eq!(format_thousands(999), "999");
            assert_eq!(format_thousands(1000), "1,000");
            assert_eq!(format_thousands(1318683096), "1,318,683,096");
            assert_eq!(format_thousands(-25268405), "-25,268,405");
        }
    }
}
