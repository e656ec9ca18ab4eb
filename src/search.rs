//! Boundary search over monotonic predicates
//!
//! A predicate over indices `0..len` is monotonic when it is false on a
//! prefix and true on the remaining suffix (or the reverse). Finding the
//! boundary takes O(log n) predicate calls by halving the candidate interval
//! and remembering the best index seen so far.
//!
//! All functions return `None` when no index satisfies the query, including
//! for empty input. Callers that want the classic `-1` form can use
//! [`as_sentinel`].

use std::cmp::Ordering;

/// Sentinel for "no satisfying element"
pub const NOT_FOUND: isize = -1;

/// Convert a search result to the `-1` sentinel form
#[inline]
pub fn as_sentinel(index: Option<usize>) -> isize {
    index.map_or(NOT_FOUND, |i| i as isize)
}

/// First index in `0..len` where `pred` holds.
///
/// `pred` must be false on a prefix and true on the rest. If that does not
/// hold the returned index is some index where `pred` is true, but not
/// necessarily the first one.
pub fn first_true<F>(len: usize, mut pred: F) -> Option<usize>
where
    F: FnMut(usize) -> bool,
{
    let mut low = 0;
    let mut high = len;
    let mut boundary = None;

    while low < high {
        let mid = low + (high - low) / 2;
        if pred(mid) {
            // Feasible, but an earlier index may be too
            boundary = Some(mid);
            high = mid;
        } else {
            low = mid + 1;
        }
    }

    boundary
}

/// First index in `0..len` where `pred` stops holding.
///
/// The reverse orientation of [`first_true`]: `pred` is true on a prefix and
/// false on the rest.
pub fn first_false<F>(len: usize, mut pred: F) -> Option<usize>
where
    F: FnMut(usize) -> bool,
{
    first_true(len, |i| !pred(i))
}

/// Index of the first element `>= target` in a sorted slice
pub fn first_not_smaller<T: Ord>(arr: &[T], target: &T) -> Option<usize> {
    first_true(arr.len(), |i| arr[i] >= *target)
}

/// Index of the first element whose key is `>= target`.
///
/// `arr` must be sorted by `key`.
pub fn first_not_smaller_by_key<T, K, F>(arr: &[T], target: K, mut key: F) -> Option<usize>
where
    K: PartialOrd,
    F: FnMut(&T) -> K,
{
    first_true(arr.len(), |i| key(&arr[i]) >= target)
}

/// Index of the first occurrence of `target` in a sorted slice
pub fn find_first_occurrence<T: Ord>(arr: &[T], target: &T) -> Option<usize> {
    let mut low = 0;
    let mut high = arr.len();
    let mut found = None;

    while low < high {
        let mid = low + (high - low) / 2;
        match arr[mid].cmp(target) {
            Ordering::Equal => {
                found = Some(mid);
                high = mid;
            }
            Ordering::Less => low = mid + 1,
            Ordering::Greater => high = mid,
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_not_smaller_examples() {
        let arr = [1, 3, 3, 5, 7];
        assert_eq!(first_not_smaller(&arr, &3), Some(1));
        assert_eq!(as_sentinel(first_not_smaller(&arr, &8)), -1);
        assert_eq!(first_not_smaller(&arr, &0), Some(0));
        assert_eq!(first_not_smaller(&arr, &4), Some(3));
        assert_eq!(first_not_smaller(&arr, &7), Some(4));
    }

    #[test]
    fn test_find_first_occurrence_examples() {
        assert_eq!(find_first_occurrence(&[1, 2, 2, 2, 5], &2), Some(1));
        assert_eq!(as_sentinel(find_first_occurrence(&[], &4)), -1);
        assert_eq!(find_first_occurrence(&[1, 2, 2, 2, 5], &3), None);
        assert_eq!(find_first_occurrence(&[4, 4, 4], &4), Some(0));
        assert_eq!(find_first_occurrence(&[1, 2, 3], &3), Some(2));
    }

    #[test]
    fn test_empty_input() {
        let empty: [i32; 0] = [];
        assert_eq!(first_not_smaller(&empty, &1), None);
        assert_eq!(first_true(0, |_| true), None);
        assert_eq!(first_false(0, |_| false), None);
    }

    #[test]
    fn test_first_true_all_or_nothing() {
        assert_eq!(first_true(10, |_| true), Some(0));
        assert_eq!(first_true(10, |_| false), None);
        assert_eq!(first_true(10, |i| i >= 9), Some(9));
    }

    #[test]
    fn test_first_false_reverse_orientation() {
        // Descending data: "still larger than 4" is true on a prefix
        let desc = [9, 8, 6, 4, 2, 1];
        assert_eq!(first_false(desc.len(), |i| desc[i] > 4), Some(3));
        assert_eq!(first_false(desc.len(), |i| desc[i] > 0), None);
    }

    #[test]
    fn test_logarithmic_comparison_count() {
        let mut comparisons = 0;
        let result = first_true(1 << 20, |i| {
            comparisons += 1;
            i >= 123_456
        });
        assert_eq!(result, Some(123_456));
        assert!(comparisons <= 21, "took {comparisons} comparisons");
    }

    #[test]
    fn test_by_key_on_floats() {
        let xs = [10.0_f32, 12.5, 15.0, 15.0, 30.0];
        assert_eq!(first_not_smaller_by_key(&xs, 13.0, |x| *x), Some(2));
        assert_eq!(first_not_smaller_by_key(&xs, 31.0, |x| *x), None);
    }

    #[test]
    fn test_sentinel() {
        assert_eq!(as_sentinel(Some(4)), 4);
        assert_eq!(as_sentinel(None), NOT_FOUND);
    }
}
