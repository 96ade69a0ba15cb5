//! Binary and galloping searches over sorted subranges.
//!
//! The `find_*` variants gallop in strides derived from a caller-provided
//! estimate of how many unique values the range holds, then finish with a
//! binary search over the final stride. With a good estimate they beat a
//! plain binary search for the short, skewed lookups the block merge does.

use std::cmp::Ordering;

/// Index of the first element in `v[start..end]` that is >= `value`.
pub fn binary_first<T, F>(v: &[T], value: &T, start: usize, end: usize, cmp: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut lo = start;
    let mut hi = end;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if cmp(&v[mid], value) == Ordering::Less {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

/// Index of the first element in `v[start..end]` that is > `value`.
pub fn binary_last<T, F>(v: &[T], value: &T, start: usize, end: usize, cmp: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut lo = start;
    let mut hi = end;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if cmp(&v[mid], value) == Ordering::Greater {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}

/// Like `binary_first`, galloping forward from `start`.
pub fn find_first_forward<T, F>(
    v: &[T],
    value: &T,
    start: usize,
    end: usize,
    cmp: &mut F,
    unique: usize,
) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    if end <= start {
        return start;
    }
    let skip = ((end - start) / unique.max(1)).max(1);
    let mut index = start + skip;
    while cmp(&v[index - 1], value) == Ordering::Less {
        if index >= end - skip {
            return binary_first(v, value, index, end, cmp);
        }
        index += skip;
    }
    binary_first(v, value, index - skip, index, cmp)
}

/// Like `binary_last`, galloping forward from `start`.
pub fn find_last_forward<T, F>(
    v: &[T],
    value: &T,
    start: usize,
    end: usize,
    cmp: &mut F,
    unique: usize,
) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    if end <= start {
        return start;
    }
    let skip = ((end - start) / unique.max(1)).max(1);
    let mut index = start + skip;
    while cmp(&v[index - 1], value) != Ordering::Greater {
        if index >= end - skip {
            return binary_last(v, value, index, end, cmp);
        }
        index += skip;
    }
    binary_last(v, value, index - skip, index, cmp)
}

/// Like `binary_first`, galloping backward from `end`.
pub fn find_first_backward<T, F>(
    v: &[T],
    value: &T,
    start: usize,
    end: usize,
    cmp: &mut F,
    unique: usize,
) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    if end <= start {
        return start;
    }
    let skip = ((end - start) / unique.max(1)).max(1);
    let mut index = end - skip;
    while index > start && cmp(&v[index - 1], value) != Ordering::Less {
        if index < start + skip {
            return binary_first(v, value, start, index, cmp);
        }
        index -= skip;
    }
    binary_first(v, value, index, index + skip, cmp)
}

/// Like `binary_last`, galloping backward from `end`.
pub fn find_last_backward<T, F>(
    v: &[T],
    value: &T,
    start: usize,
    end: usize,
    cmp: &mut F,
    unique: usize,
) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    if end <= start {
        return start;
    }
    let skip = ((end - start) / unique.max(1)).max(1);
    let mut index = end - skip;
    while index > start && cmp(&v[index - 1], value) == Ordering::Greater {
        if index < start + skip {
            return binary_last(v, value, start, index, cmp);
        }
        index -= skip;
    }
    binary_last(v, value, index, index + skip, cmp)
}
