//! Balanced subarray decomposition for the bottom-up merge levels.
//!
//! A `BlockIterator` walks the input in consecutive ranges whose lengths
//! differ by at most one, using fixed-point fractional arithmetic instead of
//! floating point. Doubling the step via `next_level` keeps the ranges
//! perfectly aligned across levels, so every merge pairs two ranges that were
//! themselves produced (and sorted) by the previous level.

/// Half-open index range into the slice being sorted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }
}

/// Bookkeeping for values pulled out of the array to form an internal buffer.
///
/// `from` is where the last pulled value was found, `to` the edge of the pair
/// the values get gathered to. `range` limits how far the values are
/// redistributed afterwards.
#[derive(Copy, Clone, Debug, Default)]
pub struct Pull {
    pub range: Range,
    pub from: usize,
    pub to: usize,
    pub count: usize,
}

/// Largest power of two that is less than or equal to `value`.
pub fn floor_power_of_two(value: usize) -> usize {
    let mut x = value;
    x |= x >> 1;
    x |= x >> 2;
    x |= x >> 4;
    x |= x >> 8;
    x |= x >> 16;
    #[cfg(target_pointer_width = "64")]
    {
        x |= x >> 32;
    }
    x - (x >> 1)
}

/// Iterator over the ranges of one merge level.
///
/// `size / denominator` rarely divides evenly; the remainder is carried in
/// `numerator` and spread across the level one extra element at a time, so
/// range lengths are either `decimal_step` or `decimal_step + 1`.
pub struct BlockIterator {
    size: usize,
    decimal: usize,
    numerator: usize,
    denominator: usize,
    decimal_step: usize,
    numerator_step: usize,
}

impl BlockIterator {
    pub fn new(size: usize, min_level: usize) -> Self {
        let power_of_two = floor_power_of_two(size);
        let denominator = (power_of_two / min_level).max(1);
        Self {
            size,
            decimal: 0,
            numerator: 0,
            denominator,
            decimal_step: size / denominator,
            numerator_step: size % denominator,
        }
    }

    /// Rewinds to the start of the current level.
    pub fn begin(&mut self) {
        self.numerator = 0;
        self.decimal = 0;
    }

    pub fn next_range(&mut self) -> Range {
        let start = self.decimal;
        self.decimal += self.decimal_step;
        self.numerator += self.numerator_step;
        if self.numerator >= self.denominator {
            self.numerator -= self.denominator;
            self.decimal += 1;
        }
        Range::new(start, self.decimal)
    }

    pub fn is_finished(&self) -> bool {
        self.decimal >= self.size
    }

    /// Doubles the range length. Returns false once a single range would
    /// cover the whole array, i.e. after the final merge level.
    pub fn next_level(&mut self) -> bool {
        self.decimal_step += self.decimal_step;
        self.numerator_step += self.numerator_step;
        if self.numerator_step >= self.denominator {
            self.numerator_step -= self.denominator;
            self.decimal_step += 1;
        }
        self.decimal_step < self.size
    }

    /// Base length of the ranges on the current level.
    pub fn len(&self) -> usize {
        self.decimal_step
    }
}
