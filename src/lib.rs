//! Stable block merge sort that runs in place, using a small fixed-size
//! cache of roughly sqrt(n) elements.
//!
//! The slice is first sorted in groups of 4 to 8 elements with stable sorting
//! networks, then merged bottom-up in levels of doubling size. Pairs whose
//! smaller side fits in the cache merge through it; larger pairs pull unique
//! values aside as internal buffers, roll A blocks of sqrt(level) size
//! through B, and merge block by block. When the input does not contain
//! enough unique values for the buffers, the merge degrades to rotations and
//! stays correct at a slower pace.
//!
//! Comparisons go through a user comparator. A comparator that violates
//! strict total order produces an unspecified order, but the slice always
//! keeps its original set of elements and the sort always terminates.
//!
//! ```
//! let mut v = vec![5, 3, 3, 1];
//! wikisort::sort(&mut v);
//! assert_eq!(v, [1, 3, 3, 5]);
//! ```

use std::cmp::Ordering;

mod iterator;
mod merge;
pub mod patterns;
mod rotate;
mod search;
mod smallsort;

use crate::iterator::{floor_power_of_two, BlockIterator, Pull, Range};
use crate::merge::{merge_external, merge_in_place, merge_internal};
use crate::rotate::{block_swap, rotate};
use crate::search::{
    binary_first, find_first_backward, find_first_forward, find_last_backward, find_last_forward,
};
use crate::smallsort::{insertion_sort, network_sort, sort_tiny};

/// Smallest cache the default sizing hands out. Below this the bookkeeping
/// costs more than the copies save.
const MIN_CACHE: usize = 16;

/// Sorts the slice stably.
pub fn sort<T: Ord + Clone>(v: &mut [T]) {
    sort_by(v, T::cmp);
}

/// Sorts the slice stably with a comparator function.
pub fn sort_by<T, F>(v: &mut [T], mut compare: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let cache_size = default_cache_size(v.len());
    let mut cache = Vec::with_capacity(cache_size);
    wiki_sort(v, &mut compare, &mut cache, cache_size);
}

/// Reusable sorter that owns the cache allocation.
///
/// Sorting many slices through one `WikiSorter` amortizes the cache
/// allocation; `with_cache_size` additionally pins the cache to a fixed
/// length, down to zero for a fully in-place sort.
///
/// ```
/// let mut sorter = wikisort::WikiSorter::with_cache_size(0);
/// let mut v = vec![2, 1];
/// sorter.sort(&mut v);
/// assert_eq!(v, [1, 2]);
/// ```
pub struct WikiSorter<T> {
    cache: Vec<T>,
    cache_size: Option<usize>,
}

impl<T: Clone> WikiSorter<T> {
    /// Sorter with the default cache sizing, about sqrt(n) per call.
    pub fn new() -> Self {
        Self {
            cache: Vec::new(),
            cache_size: None,
        }
    }

    /// Sorter whose cache holds at most `cache_size` elements.
    pub fn with_cache_size(cache_size: usize) -> Self {
        Self {
            cache: Vec::with_capacity(cache_size),
            cache_size: Some(cache_size),
        }
    }

    pub fn sort(&mut self, v: &mut [T])
    where
        T: Ord,
    {
        self.sort_by(v, T::cmp);
    }

    pub fn sort_by<F>(&mut self, v: &mut [T], mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let cache_size = self
            .cache_size
            .unwrap_or_else(|| default_cache_size(v.len()));
        self.cache.clear();
        wiki_sort(v, &mut compare, &mut self.cache, cache_size);
    }
}

impl<T: Clone> Default for WikiSorter<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn default_cache_size(len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let root = (len as f64).sqrt() as usize;
    floor_power_of_two(root).max(MIN_CACHE).min(len)
}

fn wiki_sort<T, F>(v: &mut [T], cmp: &mut F, cache: &mut Vec<T>, cache_size: usize)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let size = v.len();
    if size < 4 {
        sort_tiny(v, 0, size, cmp);
        return;
    }
    let cache_size = cache_size.min(size);

    let mut iterator = BlockIterator::new(size, 4);

    // Sort groups of 4-8 elements with stable networks.
    while !iterator.is_finished() {
        let r = iterator.next_range();
        network_sort(v, r.start, r.len(), cmp);
    }
    if size < 8 {
        return;
    }

    // Merge the sorted groups pairwise into 8-16, 16-32, and so on.
    loop {
        iterator.begin();
        if iterator.len() < cache_size {
            // The smaller side of every pair fits in the cache.
            while !iterator.is_finished() {
                let a = iterator.next_range();
                let b = iterator.next_range();

                if cmp(&v[b.end - 1], &v[a.start]) == Ordering::Less {
                    // The two ranges are in reverse order; one rotation joins them.
                    rotate(v, a.len(), a.start, b.end, cache, cache_size);
                } else if cmp(&v[b.start], &v[a.end - 1]) == Ordering::Less {
                    cache.clear();
                    cache.extend_from_slice(&v[a.start..a.end]);
                    merge_external(v, a, b, cmp, cache);
                }
                // Otherwise the pair is already in order.
            }
        } else {
            merge_level_with_internal_buffers(v, cmp, &mut iterator, cache, cache_size);
        }
        if !iterator.next_level() {
            break;
        }
    }
}

/// Merges one level whose pairs are too large for the cache, by pulling
/// unique values into up to two internal buffers and rolling A blocks.
fn merge_level_with_internal_buffers<T, F>(
    v: &mut [T],
    cmp: &mut F,
    iterator: &mut BlockIterator,
    cache: &mut Vec<T>,
    cache_size: usize,
) where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut block_size = (iterator.len() as f64).sqrt() as usize;
    let mut buffer_size = iterator.len() / block_size + 1;

    let mut buffer1 = Range::default();
    let mut buffer2 = Range::default();
    let mut pull = [Pull::default(); 2];
    let mut pull_index = 0;

    // 1) one contiguous run of 2*buffer_size uniques serves as both buffers;
    // 2) if A blocks fit in the cache only the tag buffer is needed;
    // 3) if no pair can hold 2*buffer_size uniques, find the buffers separately.
    let mut find = buffer_size + buffer_size;
    let mut find_separately = false;
    if block_size <= cache_size {
        find = buffer_size;
    } else if find > iterator.len() {
        find = buffer_size;
        find_separately = true;
    }

    // Find up to two internal buffers of unique values.
    while !iterator.is_finished() {
        let a = iterator.next_range();
        let b = iterator.next_range();
        let mut done = false;

        // Scan A for uniques, from the front.
        let mut last = a.start;
        let mut count = 1;
        while count < find {
            let index = find_last_forward(v, &v[last], last + 1, a.end, cmp, find - count);
            if index == a.end {
                break;
            }
            last = index;
            count += 1;
        }

        if count >= buffer_size {
            pull[pull_index] = Pull {
                range: Range::new(a.start, b.end),
                count,
                from: last,
                to: a.start,
            };
            if count == buffer_size + buffer_size {
                buffer1 = Range::new(a.start, a.start + buffer_size);
                buffer2 = Range::new(a.start + buffer_size, a.start + count);
                done = true;
            } else if find == buffer_size + buffer_size {
                buffer1 = Range::new(a.start, a.start + count);
                find = buffer_size;
            } else if block_size <= cache_size {
                buffer1 = Range::new(a.start, a.start + count);
                done = true;
            } else if find_separately {
                buffer1 = Range::new(a.start, a.start + count);
                find_separately = false;
            } else {
                buffer2 = Range::new(a.start, a.start + count);
                done = true;
            }
            pull_index = 1;
        } else if pull_index == 0 && count > buffer1.len() {
            // Track the largest run found so far, in case no pair holds a
            // full buffer.
            buffer1 = Range::new(a.start, a.start + count);
            pull[0] = Pull {
                range: Range::new(a.start, b.end),
                count,
                from: last,
                to: a.start,
            };
        }
        if done {
            break;
        }

        // Scan B for uniques, from the back.
        let mut last = b.end - 1;
        let mut count = 1;
        while count < find {
            let index = find_first_backward(v, &v[last], b.start, last, cmp, find - count);
            if index == b.start {
                break;
            }
            last = index - 1;
            count += 1;
        }

        if count >= buffer_size {
            pull[pull_index] = Pull {
                range: Range::new(a.start, b.end),
                count,
                from: last,
                to: b.end,
            };
            if count == buffer_size + buffer_size {
                buffer1 = Range::new(b.end - count, b.end - buffer_size);
                buffer2 = Range::new(b.end - buffer_size, b.end);
                done = true;
            } else if find == buffer_size + buffer_size {
                buffer1 = Range::new(b.end - count, b.end);
                find = buffer_size;
            } else if block_size <= cache_size {
                buffer1 = Range::new(b.end - count, b.end);
                done = true;
            } else if find_separately {
                buffer1 = Range::new(b.end - count, b.end);
                find_separately = false;
            } else {
                // buffer2 sits in the B side of the pair whose A side holds
                // buffer1; clip pull[0]'s range so redistribution stops short
                // of buffer2.
                if pull[0].range.start == a.start {
                    let pulled = pull[1].count;
                    pull[0].range.end -= pulled;
                }
                buffer2 = Range::new(b.end - count, b.end);
                done = true;
            }
            pull_index = 1;
        } else if pull_index == 0 && count > buffer1.len() {
            buffer1 = Range::new(b.end - count, b.end);
            pull[0] = Pull {
                range: Range::new(a.start, b.end),
                count,
                from: last,
                to: b.end,
            };
        }
        if done {
            break;
        }
    }

    // Gather the pulled values to the edge of their pair, one rotation per
    // unique value.
    for p in pull {
        if p.count < 2 {
            continue;
        }
        if p.to < p.from {
            for k in 1..p.count {
                let next = find_last_forward(v, &v[p.to + k - 1], p.to + k, p.from + 1, cmp, p.count - k);
                // A broken comparator may overshoot the recorded endpoint.
                let next = next.min(p.from);
                rotate(v, next - (p.to + k), p.to + k, next + 1, cache, cache_size);
            }
        } else if p.to > p.from {
            for k in 1..p.count {
                let prev = find_first_backward(v, &v[p.to - k], p.from, p.to - k, cmp, p.count - k);
                let prev = prev.max(p.from + 1);
                rotate(v, 1, prev - 1, p.to - k, cache, cache_size);
            }
        }
    }

    // Shrink block_size to fit the buffer actually found. Any non-empty
    // buffer1 yields a block_size with at most buffer1.len() full A blocks
    // per pair, so every block can be tagged.
    buffer_size = buffer1.len();
    if buffer_size > 0 {
        block_size = iterator.len() / buffer_size + 1;
    }

    // Merge each A/B pair, rolling blocks through the buffers.
    iterator.begin();
    while !iterator.is_finished() {
        let mut a = iterator.next_range();
        let mut b = iterator.next_range();

        // Exclude the parts of the pair the internal buffers occupy.
        let start = a.start;
        for p in pull {
            if start == p.range.start {
                if p.from > p.to {
                    a.start += p.count;
                } else if p.from < p.to {
                    b.end -= p.count;
                }
            }
        }
        if a.len() == 0 || b.len() == 0 {
            continue;
        }

        if cmp(&v[b.end - 1], &v[a.start]) == Ordering::Less {
            rotate(v, a.len(), a.start, b.end, cache, cache_size);
        } else if cmp(&v[a.end], &v[a.end - 1]) == Ordering::Less {
            merge_pair_with_rolling_blocks(
                v, a, b, cmp, cache, cache_size, block_size, buffer1, buffer2,
            );
        }
        // Otherwise the pair is already in order.
    }

    // The internal merges jumble the second buffer; restore its order.
    insertion_sort(v, buffer2.start, buffer2.end, cmp);

    // Redistribute the pulled values back into the array.
    for p in pull {
        let mut unique = p.count * 2;
        if p.from > p.to {
            // Pulled to the left edge, deposit rightward.
            let mut buf = Range::new(p.range.start, p.range.start + p.count);
            while buf.len() > 0 {
                let index = find_first_forward(v, &v[buf.start], buf.end, p.range.end, cmp, unique);
                let amount = index - buf.end;
                rotate(v, buf.len(), buf.start, index, cache, cache_size);
                buf.start += amount + 1;
                buf.end += amount;
                unique = (unique - 2).max(1);
            }
        } else if p.from < p.to {
            // Pulled to the right edge, deposit leftward.
            let mut buf = Range::new(p.range.end - p.count, p.range.end);
            while buf.len() > 0 {
                let index =
                    find_last_backward(v, &v[buf.end - 1], p.range.start, buf.start, cmp, unique);
                let amount = buf.start - index;
                rotate(v, amount, index, buf.end, cache, cache_size);
                buf.start -= amount;
                buf.end -= amount + 1;
                unique = (unique - 2).max(1);
            }
        }
    }
}

/// Merges one A/B pair by rolling fixed-size A blocks through B.
///
/// Each full A block's first element is tagged into `buffer1` so the blocks
/// stay ordered while they roll. Once a rolled B block ends at or past the
/// next tag, the frontmost A block drops out of the roll and merges locally
/// with the B values behind it.
#[allow(clippy::too_many_arguments)]
fn merge_pair_with_rolling_blocks<T, F>(
    v: &mut [T],
    a: Range,
    b: Range,
    cmp: &mut F,
    cache: &mut Vec<T>,
    cache_size: usize,
    block_size: usize,
    buffer1: Range,
    buffer2: Range,
) where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    // The unevenly sized block at A's front; the rest splits into full blocks.
    let mut block_a = a;
    let first_a = Range::new(a.start, a.start + block_a.len() % block_size);

    // Tag each full A block by swapping its first element into buffer1.
    let mut index_a = buffer1.start;
    let mut idx = first_a.end;
    while idx < block_a.end {
        v.swap(index_a, idx);
        index_a += 1;
        idx += block_size;
    }

    let mut last_a = first_a;
    let mut last_b = Range::default();
    let mut block_b = Range::new(b.start, b.start + block_size.min(b.len()));
    block_a.start += first_a.len();
    let mut index_a = buffer1.start;

    // Stash the uneven A block in the cache if it fits, otherwise park its
    // values in the second buffer. Mirrors the strategy choice below.
    if last_a.len() <= cache_size {
        cache.clear();
        cache.extend_from_slice(&v[last_a.start..last_a.end]);
    } else if buffer2.len() > 0 {
        block_swap(v, last_a.start, buffer2.start, last_a.len());
    }

    if block_a.len() > 0 {
        loop {
            if (last_b.len() > 0 && cmp(&v[last_b.end - 1], &v[index_a]) != Ordering::Less)
                || block_b.len() == 0
            {
                // The frontmost A block drops out of the roll. Split the
                // previous B block around the tag value.
                let b_split = binary_first(v, &v[index_a], last_b.start, last_b.end, cmp);
                let b_remaining = last_b.end - b_split;

                // Swap the minimum A block (by tag) to the front of the roll.
                let mut min_a = block_a.start;
                let mut find_a = min_a + block_size;
                while find_a < block_a.end {
                    if cmp(&v[find_a], &v[min_a]) == Ordering::Less {
                        min_a = find_a;
                    }
                    find_a += block_size;
                }
                block_swap(v, block_a.start, min_a, block_size);

                // Restore the dropped block's first element from its tag.
                v.swap(block_a.start, index_a);
                index_a += 1;

                // Merge the previous A block with the B values that follow
                // it, through whatever scratch is available.
                let ahead = Range::new(last_a.end, b_split);
                if last_a.len() <= cache_size {
                    merge_external(v, last_a, ahead, cmp, cache);
                } else if buffer2.len() > 0 {
                    merge_internal(v, last_a, ahead, cmp, buffer2);
                } else {
                    merge_in_place(v, last_a, ahead, cmp, cache, cache_size);
                }

                if buffer2.len() > 0 || block_size <= cache_size {
                    // Stash the dropped block, then swap the B remainder
                    // behind it. Equivalent to a rotation but cheaper.
                    if block_size <= cache_size {
                        cache.clear();
                        cache.extend_from_slice(&v[block_a.start..block_a.start + block_size]);
                    } else {
                        block_swap(v, block_a.start, buffer2.start, block_size);
                    }
                    block_swap(
                        v,
                        b_split,
                        block_a.start + block_size - b_remaining,
                        b_remaining,
                    );
                } else {
                    // No scratch; rotate the B remainder past the block. The
                    // cache may hold the dropped block's values, keep it out.
                    rotate(
                        v,
                        block_a.start - b_split,
                        b_split,
                        block_a.start + block_size,
                        cache,
                        0,
                    );
                }

                last_a = Range::new(
                    block_a.start - b_remaining,
                    block_a.start - b_remaining + block_size,
                );
                last_b = Range::new(last_a.end, last_a.end + b_remaining);

                block_a.start += block_size;
                if block_a.len() == 0 {
                    break;
                }
            } else if block_b.len() < block_size {
                // The final, uneven B block moves in front of the remaining
                // A blocks in one rotation. The cache may hold a live A
                // block, so the rotation must not touch it.
                rotate(
                    v,
                    block_b.start - block_a.start,
                    block_a.start,
                    block_b.end,
                    cache,
                    0,
                );
                last_b = Range::new(block_a.start, block_a.start + block_b.len());
                block_a.start += block_b.len();
                block_a.end += block_b.len();
                block_b.end = block_b.start;
            } else {
                // Roll the frontmost A block past the next B block.
                block_swap(v, block_a.start, block_b.start, block_size);
                last_b = Range::new(block_a.start, block_a.start + block_size);
                block_a.start += block_size;
                block_a.end += block_size;
                block_b.start += block_size;
                block_b.end = (block_b.end + block_size).min(b.end);
            }
        }
    }

    // Merge the last A block with whatever remains of B.
    let rest = Range::new(last_a.end, b.end);
    if last_a.len() <= cache_size {
        merge_external(v, last_a, rest, cmp, cache);
    } else if buffer2.len() > 0 {
        merge_internal(v, last_a, rest, cmp, buffer2);
    } else {
        merge_in_place(v, last_a, rest, cmp, cache, cache_size);
    }
}
