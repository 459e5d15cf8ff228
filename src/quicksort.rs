//! The recursive quicksort driver and the deterministic perturbation that keeps adversarial
//! inputs from repeatedly defeating pivot selection.

use crate::heapsort::heapsort;
use crate::partition::{partition, partition_equal};
use crate::pivot::{choose_pivot, MEDIAN_OF_MEDIANS_THRESHOLD};
use crate::smallsort::{insertion_sort, partial_insertion_sort, SMALL_SORT_THRESHOLD};

/// Sorts `v` recursively.
///
/// If the range had a predecessor in the original slice, it is specified as `pred`. `pred`
/// being `None` means `v` is the leftmost range processed so far.
///
/// `limit` is the number of allowed imbalanced partitions before switching to heapsort. If
/// zero, any range still above the insertion sort threshold goes straight to heapsort.
pub(crate) fn recurse<'a, T, F>(
    mut v: &'a mut [T],
    is_less: &mut F,
    mut pred: Option<&'a T>,
    mut limit: u32,
) where
    F: FnMut(&T, &T) -> bool,
{
    loop {
        let len = v.len();

        // Short ranges get sorted directly, without pivot selection or partitioning.
        if len <= SMALL_SORT_THRESHOLD {
            insertion_sort(v, is_less);
            return;
        }

        // Too many bad pivot choices were made. Fall back to heapsort in order to guarantee
        // `O(n * log(n))` worst-case.
        if limit == 0 {
            heapsort(v, is_less);
            return;
        }

        // Choose a pivot and stage it at the start of the range.
        choose_pivot(v, is_less);

        // If the chosen pivot is equal to the predecessor, then it's the smallest element in
        // the range. Partition the range into elements equal to and elements greater than the
        // pivot. This case is usually hit when the range contains many duplicate elements.
        if let Some(p) = pred {
            if !is_less(p, &v[0]) {
                let mid = partition_equal(v, is_less);

                // Everything up to `mid` is in its final position. Continue with the elements
                // greater than the pivot; their new predecessor cannot equal a pivot chosen
                // among them.
                v = &mut v[mid..];
                pred = None;
                continue;
            }
        }

        let (mid, was_partitioned) = partition(v, is_less);

        // Split the range into `lower`, `pivot`, and `upper`.
        let (lower, rest) = v.split_at_mut(mid);
        let (pivot, upper) = rest.split_at_mut(1);
        let pivot = &pivot[0];

        if lower.len() < len / 8 || upper.len() < len / 8 {
            // One side received less than an eighth of the elements; the pivot selection was
            // likely defeated by a patterned input. Spend one unit of the budget and shuffle a
            // few positions so the next round of pivot candidates looks different.
            limit -= 1;
            break_patterns(lower);
            break_patterns(upper);
        } else if was_partitioned
            && partial_insertion_sort(lower, is_less)
            && partial_insertion_sort(upper, is_less)
        {
            // Partitioning moved nothing and both sides turned out to be nearly sorted. The
            // whole range is sorted now.
            return;
        }

        // Recurse into the shorter side only in order to minimize the total number of
        // recursive calls and consume less stack space. Then just continue with the longer
        // side (this is akin to tail recursion).
        if lower.len() < upper.len() {
            recurse(lower, is_less, pred, limit);
            v = upper;
            pred = Some(pivot);
        } else {
            recurse(upper, is_less, Some(pivot), limit);
            v = lower;
        }
    }
}

/// Swaps a handful of elements at fixed offsets, in an attempt to break up patterns that
/// repeatedly defeat the median heuristics in `choose_pivot` and would otherwise drive
/// quicksort towards its quadratic worst case.
///
/// This is not a shuffle and uses no randomness. Two swaps near each quarter point pair it
/// with the ends of the range, which is where the next round of pivot candidates is sampled.
fn break_patterns<T>(v: &mut [T]) {
    let len = v.len();

    // Ranges this short never reach pivot selection again, perturbing them is wasted work.
    if len <= SMALL_SORT_THRESHOLD {
        return;
    }

    let quarter = len / 4;
    // Large ranges get all four quarter points, smaller ones only the outer two.
    let quarter_points = if len >= MEDIAN_OF_MEDIANS_THRESHOLD { 4 } else { 2 };

    for k in 1..=quarter_points {
        // The last quarter point can coincide with the end of the range, pull it in.
        let point = usize::min(k * quarter, len - 3);

        v.swap(point, k - 1);
        v.swap(point + 1, len - k);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_less_i32(a: &i32, b: &i32) -> bool {
        a < b
    }

    #[test]
    fn zero_limit_falls_back_to_heapsort() {
        // With no bad-partition budget left, ranges above the insertion sort threshold must
        // still come out sorted, via the fallback.
        let mut v: Vec<i32> = (0..500).map(|x| (x * 73) % 211).collect();
        let mut expected = v.clone();
        expected.sort_unstable();

        recurse(&mut v, &mut is_less_i32, None, 0);
        assert_eq!(v, expected);
    }

    #[test]
    fn break_patterns_is_deterministic() {
        let make = || (0..100).collect::<Vec<i32>>();

        let mut a = make();
        let mut b = make();
        break_patterns(&mut a);
        break_patterns(&mut b);

        assert_eq!(a, b);
        assert_ne!(a, make());
    }

    #[test]
    fn break_patterns_preserves_elements() {
        for len in [21, 50, 199, 200, 1000] {
            let mut v: Vec<i32> = (0..len).collect();
            break_patterns(&mut v);

            v.sort_unstable();
            assert_eq!(v, (0..len).collect::<Vec<i32>>());
        }
    }

    #[test]
    fn break_patterns_leaves_short_ranges_alone() {
        let mut v: Vec<i32> = (0..SMALL_SORT_THRESHOLD as i32).collect();
        let expected = v.clone();
        break_patterns(&mut v);
        assert_eq!(v, expected);
    }
}
