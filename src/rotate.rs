//! Rotations and block swaps, the space-free workhorses of the merge.

/// Swaps `v[a..a + count]` with `v[b..b + count]`. The two regions must not
/// overlap.
pub fn block_swap<T>(v: &mut [T], a: usize, b: usize, count: usize) {
    for i in 0..count {
        v.swap(a + i, b + i);
    }
}

fn reverse<T>(v: &mut [T], start: usize, end: usize) {
    let mut i = start;
    let mut j = end;
    while i + 1 < j {
        j -= 1;
        v.swap(i, j);
        i += 1;
    }
}

/// Rotates `v[start..end]` left by `amount` places.
///
/// When the smaller side fits within `cache_limit` the rotation degrades to a
/// copy through the cache plus a contiguous shift, otherwise it falls back to
/// triple reversal. Callers that currently keep live data in the cache pass a
/// `cache_limit` of 0.
pub fn rotate<T: Clone>(
    v: &mut [T],
    amount: usize,
    start: usize,
    end: usize,
    cache: &mut Vec<T>,
    cache_limit: usize,
) {
    let length = end - start;
    debug_assert!(amount <= length);
    if length == 0 || amount == 0 || amount == length {
        return;
    }
    let split = start + amount;
    let left = split - start;
    let right = end - split;

    if left <= right {
        if left <= cache_limit {
            cache.clear();
            cache.extend_from_slice(&v[start..split]);
            for i in 0..right {
                v[start + i] = v[split + i].clone();
            }
            for i in 0..left {
                v[start + right + i] = cache[i].clone();
            }
            return;
        }
    } else if right <= cache_limit {
        cache.clear();
        cache.extend_from_slice(&v[split..end]);
        for i in (0..left).rev() {
            v[start + right + i] = v[start + i].clone();
        }
        for i in 0..right {
            v[start + i] = cache[i].clone();
        }
        return;
    }

    reverse(v, start, split);
    reverse(v, split, end);
    reverse(v, start, end);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_swap_disjoint() {
        let mut v = [0, 1, 2, 3, 4, 5, 6, 7];
        block_swap(&mut v, 1, 5, 3);
        assert_eq!(v, [0, 5, 6, 7, 4, 1, 2, 3]);
    }

    #[test]
    fn rotate_matches_rotate_left() {
        for len in 0..40 {
            for amount in 0..=len {
                for cache_limit in [0, 1, 2, 8, 64] {
                    let mut v: Vec<i32> = (0..len as i32).collect();
                    let mut expected = v.clone();
                    expected.rotate_left(amount);

                    let mut cache = Vec::new();
                    rotate(&mut v, amount, 0, len, &mut cache, cache_limit);
                    assert_eq!(v, expected, "len {len} amount {amount}");
                }
            }
        }
    }

    #[test]
    fn rotate_subrange_leaves_rest_alone() {
        let mut v = [9, 0, 1, 2, 3, 4, 9];
        let mut cache = Vec::new();
        rotate(&mut v, 2, 1, 6, &mut cache, 16);
        assert_eq!(v, [9, 2, 3, 4, 0, 1, 9]);
    }
}
