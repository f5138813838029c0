/// A closed range of ray parameters `t`.
///
/// Every intersection query receives the interval it is allowed to report
/// hits in. Closest-hit traversal narrows `max` to the best hit found so far
/// and hands the narrowed interval to the remaining tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// True if `x` lies in `[min, max]`.
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// True if `x` lies in `(min, max)`.
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Same lower bound, upper bound replaced by `max`.
    #[inline]
    pub fn with_max(&self, max: f32) -> Interval {
        Interval::new(self.min, max)
    }
}
