//! The three merge strategies, picked by how much scratch space is on hand.
//!
//! All three merge two adjacent sorted ranges A and B and keep equal elements
//! in A-before-B order:
//!
//! - `merge_external`: A's values were copied into the cache, so the merge is
//!   a straight two-way write into the array.
//! - `merge_internal`: A's values were swapped into an internal buffer of the
//!   same length; the merge swaps winners into place, displacing the buffer's
//!   junk contents into the space it vacates.
//! - `merge_in_place`: no scratch at all, insert A's head run into B by
//!   rotation and repeat on the shrunken ranges.

use std::cmp::Ordering;

use crate::iterator::Range;
use crate::rotate::{block_swap, rotate};
use crate::search::{binary_first, binary_last};

/// Merges `v[a]` (whose values live in `cache[..a.len()]`) with `v[b]`.
/// `b` must start where `a` ends.
pub fn merge_external<T, F>(v: &mut [T], a: Range, b: Range, cmp: &mut F, cache: &[T])
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut a_index = 0;
    let mut b_index = b.start;
    let mut insert = a.start;
    let a_last = a.len();
    let b_last = b.end;

    if b.len() > 0 && a.len() > 0 {
        loop {
            if cmp(&v[b_index], &cache[a_index]) != Ordering::Less {
                v[insert] = cache[a_index].clone();
                a_index += 1;
                insert += 1;
                if a_index == a_last {
                    break;
                }
            } else {
                v[insert] = v[b_index].clone();
                b_index += 1;
                insert += 1;
                if b_index == b_last {
                    break;
                }
            }
        }
    }

    // B's leftovers are already in place; copy back whatever remains of A.
    while a_index < a_last {
        v[insert] = cache[a_index].clone();
        insert += 1;
        a_index += 1;
    }
}

/// Merges `v[a]` with `v[b]`, where A's true values sit in `buffer` and `a`
/// itself holds the buffer's junk. Afterwards the junk occupies `buffer`,
/// in some jumbled order.
pub fn merge_internal<T, F>(v: &mut [T], a: Range, b: Range, cmp: &mut F, buffer: Range)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut a_count = 0;
    let mut b_count = 0;
    let mut insert = 0;

    if b.len() > 0 && a.len() > 0 {
        loop {
            if cmp(&v[b.start + b_count], &v[buffer.start + a_count]) != Ordering::Less {
                v.swap(a.start + insert, buffer.start + a_count);
                a_count += 1;
                insert += 1;
                if a_count >= a.len() {
                    break;
                }
            } else {
                v.swap(a.start + insert, b.start + b_count);
                b_count += 1;
                insert += 1;
                if b_count >= b.len() {
                    break;
                }
            }
        }
    }

    block_swap(v, buffer.start + a_count, a.start + insert, a.len() - a_count);
}

/// Rotation-based merge of `v[a]` and `v[b]` without any scratch space.
pub fn merge_in_place<T, F>(
    v: &mut [T],
    a: Range,
    b: Range,
    cmp: &mut F,
    cache: &mut Vec<T>,
    cache_size: usize,
) where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    if a.len() == 0 || b.len() == 0 {
        return;
    }
    let mut a = a;
    let mut b = b;

    loop {
        // Find the first place in B where the head of A belongs, then rotate
        // A there in one go.
        let mid = binary_first(v, &v[a.start], b.start, b.end, cmp);
        let amount = mid - a.end;
        rotate(v, a.len(), a.start, mid, cache, cache_size);
        if b.end == mid {
            break;
        }

        b.start = mid;
        a = Range::new(a.start + amount, b.start);
        let skip = binary_last(v, &v[a.start], a.start, a.end, cmp);
        // Always advance, so a comparator that violates Ord cannot hang us.
        a.start = skip.max(a.start + 1);
        if a.len() == 0 {
            break;
        }
    }
}
