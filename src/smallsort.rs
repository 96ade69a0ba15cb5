//! Stable sorting networks for the 4 to 8 element base case, plus the
//! insertion sort used to repair the second internal buffer.
//!
//! Sorting networks are oblivious, so stability has to be reintroduced: each
//! comparator also consults the original position of the two values and only
//! swaps equal values if they are out of original order. The `order` array
//! tracks positions through the swaps.

use std::cmp::Ordering;

const NETWORK_4: &[(usize, usize)] = &[(0, 1), (2, 3), (0, 2), (1, 3), (1, 2)];

const NETWORK_5: &[(usize, usize)] = &[
    (0, 1),
    (3, 4),
    (2, 4),
    (2, 3),
    (1, 4),
    (0, 3),
    (0, 2),
    (1, 3),
    (1, 2),
];

const NETWORK_6: &[(usize, usize)] = &[
    (1, 2),
    (4, 5),
    (0, 2),
    (3, 5),
    (0, 1),
    (3, 4),
    (2, 5),
    (0, 3),
    (1, 4),
    (2, 4),
    (1, 3),
    (2, 3),
];

const NETWORK_7: &[(usize, usize)] = &[
    (1, 2),
    (3, 4),
    (5, 6),
    (0, 2),
    (3, 5),
    (4, 6),
    (0, 1),
    (4, 5),
    (2, 6),
    (0, 4),
    (1, 5),
    (0, 3),
    (2, 5),
    (1, 3),
    (2, 4),
    (2, 3),
];

const NETWORK_8: &[(usize, usize)] = &[
    (0, 1),
    (2, 3),
    (4, 5),
    (6, 7),
    (0, 2),
    (1, 3),
    (4, 6),
    (5, 7),
    (1, 2),
    (5, 6),
    (0, 4),
    (3, 7),
    (1, 5),
    (2, 6),
    (1, 4),
    (3, 6),
    (2, 4),
    (3, 5),
    (3, 4),
];

/// Stable sort for `v[start..start + len]` with `len <= 3`.
pub fn sort_tiny<T, F>(v: &mut [T], start: usize, len: usize, cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    if len == 2 {
        if cmp(&v[start + 1], &v[start]) == Ordering::Less {
            v.swap(start, start + 1);
        }
    } else if len == 3 {
        if cmp(&v[start + 1], &v[start]) == Ordering::Less {
            v.swap(start, start + 1);
        }
        if cmp(&v[start + 2], &v[start + 1]) == Ordering::Less {
            v.swap(start + 1, start + 2);
            if cmp(&v[start + 1], &v[start]) == Ordering::Less {
                v.swap(start, start + 1);
            }
        }
    }
}

/// Stable sort for `v[start..start + len]` with `len <= 8`.
pub fn network_sort<T, F>(v: &mut [T], start: usize, len: usize, cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let network = match len {
        0..=3 => {
            sort_tiny(v, start, len, cmp);
            return;
        }
        4 => NETWORK_4,
        5 => NETWORK_5,
        6 => NETWORK_6,
        7 => NETWORK_7,
        _ => NETWORK_8,
    };
    debug_assert!(len <= 8);

    let mut order = [0, 1, 2, 3, 4, 5, 6, 7];
    for &(x, y) in network {
        let result = cmp(&v[start + x], &v[start + y]);
        if result == Ordering::Greater || (result == Ordering::Equal && order[x] > order[y]) {
            v.swap(start + x, start + y);
            order.swap(x, y);
        }
    }
}

/// Stable insertion sort over `v[start..end]`.
pub fn insertion_sort<T, F>(v: &mut [T], start: usize, end: usize, cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in start + 1..end {
        let mut j = i;
        while j > start && cmp(&v[j], &v[j - 1]) == Ordering::Less {
            v.swap(j, j - 1);
            j -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_cmp(a: &(i32, usize), b: &(i32, usize)) -> Ordering {
        a.0.cmp(&b.0)
    }

    fn permutations(len: usize) -> Vec<Vec<i32>> {
        if len == 0 {
            return vec![Vec::new()];
        }
        let mut out = Vec::new();
        for perm in permutations(len - 1) {
            for pos in 0..=perm.len() {
                let mut next = perm.clone();
                next.insert(pos, len as i32 - 1);
                out.push(next);
            }
        }
        out
    }

    #[test]
    fn sorts_all_permutations() {
        for len in 0..=8 {
            for perm in permutations(len) {
                let mut v = perm.clone();
                network_sort(&mut v, 0, len, &mut |a: &i32, b: &i32| a.cmp(b));
                let mut expected = perm.clone();
                expected.sort();
                assert_eq!(v, expected, "input {perm:?}");
            }
        }
    }

    #[test]
    fn stable_on_all_zero_one_inputs() {
        // The 0/1 principle covers ordering; tagging each element with its
        // original index covers stability for every duplicate arrangement.
        for len in 2..=8usize {
            for bits in 0..1u32 << len {
                let input: Vec<(i32, usize)> = (0..len)
                    .map(|i| (((bits >> i) & 1) as i32, i))
                    .collect();

                let mut v = input.clone();
                network_sort(&mut v, 0, len, &mut key_cmp);

                let mut expected = input.clone();
                expected.sort_by(key_cmp);
                assert_eq!(v, expected, "len {len} bits {bits:b}");
            }
        }
    }

    #[test]
    fn network_sort_respects_offset() {
        let mut v = [9, 9, 3, 1, 2, 0, 9];
        network_sort(&mut v, 2, 4, &mut |a: &i32, b: &i32| a.cmp(b));
        assert_eq!(v, [9, 9, 0, 1, 2, 3, 9]);
    }

    #[test]
    fn insertion_sort_is_stable() {
        let mut v: Vec<(i32, usize)> = vec![(1, 0), (0, 1), (1, 2), (0, 3), (1, 4)];
        insertion_sort(&mut v, 0, 5, &mut key_cmp);
        assert_eq!(v, vec![(0, 1), (0, 3), (1, 0), (1, 2), (1, 4)]);
    }
}
