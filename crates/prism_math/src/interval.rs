/// A closed range of real numbers `[min, max]`.
///
/// Used for accepted ray distances and for clamping colour components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// The unit interval `[0, 1]`.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };

    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// True if `x` lies strictly between the bounds.
    pub fn surrounds(&self, x: f64) -> bool {
        self.min < x && x < self.max
    }

    /// Pull `x` into `[min, max]`.
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }
}
