//! In-place quicksort with Hoare and Lomuto partition schemes, exposed as
//! interchangeable strategies.

use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::GalleryError;

// ============================================================================
// Hoare partition scheme
// ============================================================================

pub fn quicksort_hoare<T: Ord>(data: &mut [T]) {
    quicksort_hoare_by(data, |a, b| a.cmp(b));
}

pub fn quicksort_hoare_by<T, F>(data: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut is_less = |a: &T, b: &T| compare(a, b) == Ordering::Less;
    hoare_sort(data, &mut is_less);
}

fn hoare_sort<T, F>(mut v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    // Recurse into the smaller half, loop on the larger: depth stays O(log n).
    while v.len() > 1 {
        let split = hoare_partition(v, is_less);
        let (left, right) = std::mem::take(&mut v).split_at_mut(split + 1);
        if left.len() < right.len() {
            hoare_sort(left, is_less);
            v = right;
        } else {
            hoare_sort(right, is_less);
            v = left;
        }
    }
}

/// Partitions `v` (length >= 2) around its middle element and returns `j`
/// such that `v[..=j] <= pivot <= v[j + 1..]`, with `j < v.len() - 1`.
///
/// Both scans stop on elements equal to the pivot, so a run of duplicates is
/// split down the middle instead of piling up on one side. The pivot is never
/// copied out of the slice; its index is tracked as swaps move it around.
fn hoare_partition<T, F>(v: &mut [T], is_less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    v.swap(0, v.len() / 2);
    let mut pivot = 0;
    let mut i = 0;
    let mut j = v.len() - 1;

    loop {
        while is_less(&v[pivot], &v[j]) {
            j -= 1;
        }
        while is_less(&v[i], &v[pivot]) {
            i += 1;
        }
        if i >= j {
            return j;
        }

        v.swap(i, j);
        if pivot == i {
            pivot = j;
        } else if pivot == j {
            pivot = i;
        }
        i += 1;
        j -= 1;
    }
}

// ============================================================================
// Lomuto partition scheme
// ============================================================================

pub fn quicksort_lomuto<T: Ord>(data: &mut [T]) {
    quicksort_lomuto_by(data, |a, b| a.cmp(b));
}

pub fn quicksort_lomuto_by<T, F>(data: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut is_less = |a: &T, b: &T| compare(a, b) == Ordering::Less;
    lomuto_sort(data, &mut is_less);
}

fn lomuto_sort<T, F>(mut v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    while v.len() > 1 {
        let pivot = lomuto_partition(v, is_less);
        let (left, rest) = std::mem::take(&mut v).split_at_mut(pivot);
        // rest[0] is the pivot, already in its final place
        let right = &mut rest[1..];
        if left.len() < right.len() {
            lomuto_sort(left, is_less);
            v = right;
        } else {
            lomuto_sort(right, is_less);
            v = left;
        }
    }
}

/// Moves the middle element to the end, sweeps everything `<=` it to the
/// front, then drops it between the two groups. Returns its final index.
fn lomuto_partition<T, F>(v: &mut [T], is_less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    let last = v.len() - 1;
    v.swap(v.len() / 2, last);

    let mut store = 0;
    for j in 0..last {
        if !is_less(&v[last], &v[j]) {
            v.swap(store, j);
            store += 1;
        }
    }

    v.swap(store, last);
    store
}

// ============================================================================
// Strategy abstraction
// ============================================================================

pub trait SortStrategy<T> {
    fn name(&self) -> &'static str;
    fn sort(&self, data: &mut [T]);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HoareQuickSort;

impl<T: Ord> SortStrategy<T> for HoareQuickSort {
    fn name(&self) -> &'static str {
        "Hoare quicksort"
    }

    fn sort(&self, data: &mut [T]) {
        quicksort_hoare(data);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LomutoQuickSort;

impl<T: Ord> SortStrategy<T> for LomutoQuickSort {
    fn name(&self) -> &'static str {
        "Lomuto quicksort"
    }

    fn sort(&self, data: &mut [T]) {
        quicksort_lomuto(data);
    }
}

/// Runtime-selectable partition scheme, as named in config and on the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortAlgorithm {
    #[default]
    Hoare,
    Lomuto,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 2] = [SortAlgorithm::Hoare, SortAlgorithm::Lomuto];

    pub fn strategy<T: Ord>(self) -> Box<dyn SortStrategy<T>> {
        match self {
            SortAlgorithm::Hoare => Box::new(HoareQuickSort),
            SortAlgorithm::Lomuto => Box::new(LomutoQuickSort),
        }
    }

    pub fn sort_by<T, F>(self, data: &mut [T], compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        match self {
            SortAlgorithm::Hoare => quicksort_hoare_by(data, compare),
            SortAlgorithm::Lomuto => quicksort_lomuto_by(data, compare),
        }
    }
}

impl<T: Ord> SortStrategy<T> for SortAlgorithm {
    fn name(&self) -> &'static str {
        match self {
            SortAlgorithm::Hoare => <HoareQuickSort as SortStrategy<T>>::name(&HoareQuickSort),
            SortAlgorithm::Lomuto => <LomutoQuickSort as SortStrategy<T>>::name(&LomutoQuickSort),
        }
    }

    fn sort(&self, data: &mut [T]) {
        self.sort_by(data, |a, b| a.cmp(b));
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortAlgorithm::Hoare => write!(f, "hoare"),
            SortAlgorithm::Lomuto => write!(f, "lomuto"),
        }
    }
}

impl FromStr for SortAlgorithm {
    type Err = GalleryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hoare" => Ok(SortAlgorithm::Hoare),
            "lomuto" => Ok(SortAlgorithm::Lomuto),
            _ => Err(GalleryError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Strategy context: holds one strategy and can swap it at runtime.
pub struct Sorter<T> {
    strategy: Box<dyn SortStrategy<T>>,
}

impl<T> Sorter<T> {
    pub fn new(strategy: Box<dyn SortStrategy<T>>) -> Self {
        Self { strategy }
    }

    pub fn set_strategy(&mut self, strategy: Box<dyn SortStrategy<T>>) {
        debug!(
            "switching sort strategy: {} -> {}",
            self.strategy.name(),
            strategy.name()
        );
        self.strategy = strategy;
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn sort(&self, data: &mut [T]) {
        debug!("sorting {} items with {}", data.len(), self.strategy.name());
        self.strategy.sort(data);
    }
}

impl<T: Ord> From<SortAlgorithm> for Sorter<T> {
    fn from(algorithm: SortAlgorithm) -> Self {
        Self::new(algorithm.strategy())
    }
}

/// Sorts `data` with `algorithm` and reports how many comparisons it took.
pub fn count_comparisons<T: Ord>(algorithm: SortAlgorithm, data: &mut [T]) -> usize {
    let mut comparisons = 0;
    algorithm.sort_by(data, |a, b| {
        comparisons += 1;
        a.cmp(b)
    });
    comparisons
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn is_sorted<T: Ord>(data: &[T]) -> bool {
        data.windows(2).all(|w| w[0] <= w[1])
    }

    fn both(mut data: Vec<i32>) -> (Vec<i32>, Vec<i32>) {
        let mut other = data.clone();
        quicksort_hoare(&mut data);
        quicksort_lomuto(&mut other);
        (data, other)
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(both(vec![]), (vec![], vec![]));
        assert_eq!(both(vec![7]), (vec![7], vec![7]));
    }

    #[test]
    fn test_two_elements() {
        assert_eq!(both(vec![2, 1]), (vec![1, 2], vec![1, 2]));
        assert_eq!(both(vec![1, 2]), (vec![1, 2], vec![1, 2]));
        assert_eq!(both(vec![3, 3]), (vec![3, 3], vec![3, 3]));
    }

    #[test]
    fn test_sorted_and_reversed() {
        let sorted: Vec<i32> = (0..200).collect();
        let reversed: Vec<i32> = (0..200).rev().collect();

        let (h, l) = both(sorted.clone());
        assert_eq!(h, sorted);
        assert_eq!(l, sorted);

        let (h, l) = both(reversed);
        assert_eq!(h, sorted);
        assert_eq!(l, sorted);
    }

    #[test]
    fn test_all_duplicates() {
        let (h, l) = both(vec![5; 64]);
        assert_eq!(h, vec![5; 64]);
        assert_eq!(l, vec![5; 64]);
    }

    #[test]
    fn test_extremes() {
        let data = vec![i32::MAX, 0, i32::MIN, -1, i32::MAX, i32::MIN];
        let mut expected = data.clone();
        expected.sort();
        let (h, l) = both(data);
        assert_eq!(h, expected);
        assert_eq!(l, expected);
    }

    #[test]
    fn test_non_clone_items() {
        #[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
        struct Ticket(u32);

        let mut tickets: Vec<Ticket> = [4, 1, 3, 1, 2].into_iter().map(Ticket).collect();
        quicksort_hoare(&mut tickets);
        assert_eq!(tickets.iter().map(|t| t.0).collect::<Vec<_>>(), vec![1, 1, 2, 3, 4]);

        let mut tickets: Vec<Ticket> = [4, 1, 3, 1, 2].into_iter().map(Ticket).collect();
        quicksort_lomuto(&mut tickets);
        assert_eq!(tickets.iter().map(|t| t.0).collect::<Vec<_>>(), vec![1, 1, 2, 3, 4]);
    }

    #[test]
    fn test_strings() {
        let mut words = vec!["pear".to_string(), "apple".to_string(), "fig".to_string()];
        quicksort_hoare(&mut words);
        assert_eq!(words, vec!["apple", "fig", "pear"]);
    }

    #[test]
    fn test_custom_comparator_descending() {
        let mut data = vec![3, 9, 1, 7];
        quicksort_hoare_by(&mut data, |a, b| b.cmp(a));
        assert_eq!(data, vec![9, 7, 3, 1]);

        let mut data = vec![3, 9, 1, 7];
        quicksort_lomuto_by(&mut data, |a, b| b.cmp(a));
        assert_eq!(data, vec![9, 7, 3, 1]);
    }

    #[test]
    fn test_hoare_partition_invariant() {
        let mut data = vec![9, 4, 7, 4, 1, 8, 4, 2];
        let split = hoare_partition(&mut data, &mut |a: &i32, b: &i32| a < b);
        assert!(split < data.len() - 1);

        let max_left = data[..=split].iter().max().copied().unwrap();
        let min_right = data[split + 1..].iter().min().copied().unwrap();
        assert!(max_left <= min_right);
    }

    #[test]
    fn test_lomuto_partition_places_pivot() {
        let mut data = vec![5, 2, 8, 6, 1, 9];
        let pivot = lomuto_partition(&mut data, &mut |a: &i32, b: &i32| a < b);
        let value = data[pivot];
        assert!(data[..pivot].iter().all(|&x| x <= value));
        assert!(data[pivot + 1..].iter().all(|&x| x >= value));
    }

    #[test]
    fn test_large_duplicate_heavy_input_hoare() {
        let mut data: Vec<u8> = (0..50_000).map(|i| (i % 3) as u8).collect();
        quicksort_hoare(&mut data);
        assert!(is_sorted(&data));
    }

    /// Runs `job` on a thread with a small stack; linear recursion depth
    /// on these inputs would overflow it.
    fn on_small_stack(job: impl FnOnce() + Send + 'static) {
        std::thread::Builder::new()
            .stack_size(128 * 1024)
            .spawn(job)
            .unwrap()
            .join()
            .unwrap();
    }

    #[test]
    fn test_hoare_shallow_recursion_on_large_inputs() {
        on_small_stack(|| {
            let mut sorted: Vec<u32> = (0..200_000).collect();
            quicksort_hoare(&mut sorted);
            assert!(is_sorted(&sorted));

            let mut equal = vec![7u32; 200_000];
            quicksort_hoare(&mut equal);
            assert!(equal.iter().all(|&x| x == 7));
        });
    }

    #[test]
    fn test_lomuto_shallow_recursion_on_equal_keys() {
        // Every partition peels off one element, so only looping on the
        // larger side keeps the stack flat.
        on_small_stack(|| {
            let mut equal = vec![7u32; 10_000];
            quicksort_lomuto(&mut equal);
            assert!(equal.iter().all(|&x| x == 7));
        });
    }

    #[test]
    fn test_hoare_cheaper_on_duplicates() {
        let mut a = vec![1u8; 512];
        let mut b = vec![1u8; 512];
        let hoare = count_comparisons(SortAlgorithm::Hoare, &mut a);
        let lomuto = count_comparisons(SortAlgorithm::Lomuto, &mut b);
        assert!(hoare < lomuto, "hoare {} vs lomuto {}", hoare, lomuto);
    }

    #[test]
    fn test_sorter_switches_strategy() {
        let mut sorter: Sorter<i32> = Sorter::new(Box::new(HoareQuickSort));
        assert_eq!(sorter.strategy_name(), "Hoare quicksort");

        let mut data = vec![3, 1, 2];
        sorter.sort(&mut data);
        assert_eq!(data, vec![1, 2, 3]);

        sorter.set_strategy(Box::new(LomutoQuickSort));
        assert_eq!(sorter.strategy_name(), "Lomuto quicksort");

        let mut data = vec![6, 5, 4];
        sorter.sort(&mut data);
        assert_eq!(data, vec![4, 5, 6]);
    }

    #[test]
    fn test_sorter_from_algorithm() {
        let sorter: Sorter<i32> = SortAlgorithm::Lomuto.into();
        assert_eq!(sorter.strategy_name(), "Lomuto quicksort");
    }

    #[test]
    fn test_algorithm_parse() {
        assert_eq!("hoare".parse::<SortAlgorithm>().unwrap(), SortAlgorithm::Hoare);
        assert_eq!(" LOMUTO ".parse::<SortAlgorithm>().unwrap(), SortAlgorithm::Lomuto);
        assert!(matches!(
            "bubble".parse::<SortAlgorithm>(),
            Err(GalleryError::UnknownAlgorithm(name)) if name == "bubble"
        ));
    }

    #[test]
    fn test_algorithm_display_roundtrip() {
        for algorithm in SortAlgorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<SortAlgorithm>().unwrap(), algorithm);
        }
    }

    proptest! {
        #[test]
        fn test_hoare_matches_std(mut data: Vec<i32>) {
            let mut expected = data.clone();
            expected.sort();
            quicksort_hoare(&mut data);
            prop_assert_eq!(data, expected);
        }

        #[test]
        fn test_lomuto_matches_std(mut data: Vec<i32>) {
            let mut expected = data.clone();
            expected.sort();
            quicksort_lomuto(&mut data);
            prop_assert_eq!(data, expected);
        }

        #[test]
        fn test_small_domain_duplicates(data in prop::collection::vec(0u8..4, 0..300)) {
            for algorithm in SortAlgorithm::ALL {
                let mut sorted = data.clone();
                <SortAlgorithm as SortStrategy<u8>>::sort(&algorithm, &mut sorted);
                prop_assert!(is_sorted(&sorted));
                prop_assert_eq!(sorted.len(), data.len());
            }
        }
    }
}
