//! Pivot selection. The chosen pivot is staged at the front of the range, where the
//! partitioners expect it.

use crate::smallsort::SMALL_SORT_THRESHOLD;

/// Minimum length for the median-of-medians sampling. Shorter ranges use plain
/// median-of-three.
pub(crate) const MEDIAN_OF_MEDIANS_THRESHOLD: usize = 200;

/// Chooses a pivot in `v` and moves it to `v[0]`.
///
/// Mid-size ranges take the median of the first, middle and last element. Large ranges use
/// the median of three group medians, the "ninther", which patterned inputs such as organ
/// pipe sequences have a much harder time defeating.
///
/// Elements in `v` might be reordered in the process.
pub(crate) fn choose_pivot<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    debug_assert!(len > SMALL_SORT_THRESHOLD);

    let mid = len / 2;

    if len < MEDIAN_OF_MEDIANS_THRESHOLD {
        sort3(v, 0, mid, len - 1, is_less);
    } else {
        // One group of three adjacent positions in each third of the range. Sorting a group
        // leaves its median in the group center, sorting the three centers leaves the median
        // of medians at `mid`.
        let lo = len / 6;
        let hi = len - 1 - len / 6;

        sort3(v, lo - 1, lo, lo + 1, is_less);
        sort3(v, mid - 1, mid, mid + 1, is_less);
        sort3(v, hi - 1, hi, hi + 1, is_less);

        sort3(v, lo, mid, hi, is_less);
    }

    v.swap(0, mid);
}

/// 3-element sorting network over the positions `a`, `b` and `c`. Afterwards
/// `v[a] <= v[b] <= v[c]` holds, with the median at `b`.
fn sort3<T, F>(v: &mut [T], a: usize, b: usize, c: usize, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    if is_less(&v[b], &v[a]) {
        v.swap(a, b);
    }
    if is_less(&v[c], &v[b]) {
        v.swap(b, c);
    }
    if is_less(&v[b], &v[a]) {
        v.swap(a, b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_less_i32(a: &i32, b: &i32) -> bool {
        a < b
    }

    #[test]
    fn median_of_three_staged_at_front() {
        // Median of v[0], v[10] and v[20].
        let mut v: Vec<i32> = (0..21).collect();
        choose_pivot(&mut v, &mut is_less_i32);
        assert_eq!(v[0], 10);

        let mut v: Vec<i32> = (0..21).rev().collect();
        choose_pivot(&mut v, &mut is_less_i32);
        assert_eq!(v[0], 10);
    }

    #[test]
    fn ninther_staged_at_front() {
        // For ascending input every sampled group is sorted already, so the ninther is the
        // middle element.
        let mut v: Vec<i32> = (0..300).collect();
        choose_pivot(&mut v, &mut is_less_i32);
        assert_eq!(v[0], 150);
    }

    #[test]
    fn choose_pivot_preserves_elements() {
        let mut v: Vec<i32> = (0..250).map(|x| (x * 37) % 101).collect();
        let mut expected = v.clone();
        choose_pivot(&mut v, &mut is_less_i32);

        v.sort_unstable();
        expected.sort_unstable();
        assert_eq!(v, expected);
    }

    #[test]
    fn sort3_orders_positions() {
        let mut v = [9, 0, 0, 0, 5, 0, 0, 0, 1];
        sort3(&mut v, 0, 4, 8, &mut is_less_i32);
        assert_eq!(v[0], 1);
        assert_eq!(v[4], 5);
        assert_eq!(v[8], 9);
    }
}
