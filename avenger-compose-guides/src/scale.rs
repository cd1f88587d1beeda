use itertools::Itertools;
use serde_json::Value;

use crate::ticks;

/// Linear mapping from a numeric domain to pixel range
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain_start: f32,
    domain_end: f32,
    range_start: f32,
    range_end: f32,
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::new((0.0, 1.0), (0.0, 1.0))
    }
}

impl LinearScale {
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Self {
        Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        }
    }

    pub fn domain(&self) -> (f32, f32) {
        (self.domain_start, self.domain_end)
    }

    pub fn range(&self) -> (f32, f32) {
        (self.range_start, self.range_end)
    }

    pub fn with_domain(mut self, domain: (f32, f32)) -> Self {
        self.domain_start = domain.0;
        self.domain_end = domain.1;
        self
    }

    pub fn with_range(mut self, range: (f32, f32)) -> Self {
        self.range_start = range.0;
        self.range_end = range.1;
        self
    }

    /// Extends the domain to nice round numbers for better tick selection
    pub fn nice(self, count: usize) -> Self {
        self.with_domain(ticks::nice(self.domain(), count as f32))
    }

    pub fn scale(&self, value: f32) -> f32 {
        let domain_span = self.domain_end - self.domain_start;
        if domain_span == 0.0 || domain_span.is_nan() {
            return self.range_start;
        }
        let t = (value - self.domain_start) / domain_span;
        self.range_start + t * (self.range_end - self.range_start)
    }

    pub fn invert(&self, value: f32) -> f32 {
        let range_span = self.range_end - self.range_start;
        if range_span == 0.0 || range_span.is_nan() {
            return self.domain_start;
        }
        let t = (value - self.range_start) / range_span;
        self.domain_start + t * (self.domain_end - self.domain_start)
    }

    pub fn ticks(&self, count: usize) -> Vec<f32> {
        ticks::ticks(self.domain_start, self.domain_end, count as f32)
    }

    pub fn tick_step(&self, count: usize) -> f32 {
        ticks::tick_step(self.domain_start, self.domain_end, count as f32)
    }
}

/// Numeric values of `key` across an array of objects. Bare numbers are taken as is.
pub fn field_values(data: &Value, key: Option<&str>) -> Vec<f32> {
    let Some(rows) = data.as_array() else {
        return vec![];
    };
    rows.iter()
        .filter_map(|row| match (key, row) {
            (Some(key), Value::Object(fields)) => fields.get(key).and_then(Value::as_f64),
            (None, value) => value.as_f64(),
            _ => None,
        })
        .map(|v| v as f32)
        .collect()
}

/// Smallest interval covering every value
pub fn extent(values: &[f32]) -> Option<(f32, f32)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .minmax()
        .into_option()
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use serde_json::json;

    #[test]
    fn test_scale_and_invert() {
        let scale = LinearScale::new((0.0, 10.0), (100.0, 0.0));
        assert_approx_eq!(f32, scale.scale(0.0), 100.0);
        assert_approx_eq!(f32, scale.scale(2.5), 75.0);
        assert_approx_eq!(f32, scale.invert(50.0), 5.0);
    }

    #[test]
    fn test_degenerate_domain() {
        let scale = LinearScale::new((3.0, 3.0), (0.0, 50.0));
        assert_eq!(scale.scale(7.0), 0.0);
    }

    #[test]
    fn test_field_values() {
        let data = json!([{"x": 1, "y": 4}, {"x": 2.5}, {"y": 0}]);
        assert_eq!(field_values(&data, Some("x")), vec![1.0, 2.5]);
        assert_eq!(field_values(&json!([3, 1, 2]), None), vec![3.0, 1.0, 2.0]);
        assert_eq!(extent(&[3.0, 1.0, 2.0]), Some((1.0, 3.0)));
        assert_eq!(extent(&[]), None);
    }
}
