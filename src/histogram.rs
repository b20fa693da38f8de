use chrono::Weekday;
use std::marker::PhantomData;

use crate::bucket::TimeOfDay;

// -------------------------------------------------------------------------------------------------
// Bucket
// -------------------------------------------------------------------------------------------------
/// A key of a histogram with a fixed, ordered set of values.
pub trait Bucket: Copy + 'static {
    /// Every key, in display order
    const ALL: &'static [Self];

    /// The position of this key within `ALL`
    fn index(self) -> usize;

    /// The name shown for this key in rendered output
    fn label(self) -> &'static str;
}

// -------------------------------------------------------------------------------------------------
// Histogram
// -------------------------------------------------------------------------------------------------
/// Non-negative counts for each key of `K`, kept in `K::ALL` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram<K> {
    counts: Vec<u64>,
    _key: PhantomData<K>,
}

impl<K: Bucket> Histogram<K> {
    pub fn new() -> Self {
        Histogram {
            counts: vec![0; K::ALL.len()],
            _key: PhantomData,
        }
    }

    pub fn increment(&mut self, key: K) {
        self.counts[key.index()] += 1;
    }

    pub fn get(&self, key: K) -> u64 {
        self.counts[key.index()]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Add the counts of `other` to this histogram, key by key.
    pub fn merge(&mut self, other: &Self) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine += theirs;
        }
    }

    /// Iterate over `(key, count)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (K, u64)> + '_ {
        K::ALL.iter().map(move |&k| (k, self.get(k)))
    }
}

impl<K: Bucket> Default for Histogram<K> {
    fn default() -> Self {
        Self::new()
    }
}

pub type WeekdayHistogram = Histogram<Weekday>;
pub type TimeHistogram = Histogram<TimeOfDay>;

// -------------------------------------------------------------------------------------------------
// CommitHistograms
// -------------------------------------------------------------------------------------------------
/// The pair of histograms accumulated for a run.
///
/// Every recorded commit increments exactly one key of each histogram, so both always have the same
/// total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitHistograms {
    pub weekdays: WeekdayHistogram,
    pub times: TimeHistogram,
}

impl CommitHistograms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, (weekday, time): (Weekday, TimeOfDay)) {
        self.weekdays.increment(weekday);
        self.times.increment(time);
    }

    pub fn merge(&mut self, other: &CommitHistograms) {
        self.weekdays.merge(&other.weekdays);
        self.times.merge(&other.times);
    }

    /// The number of commits recorded.
    pub fn total(&self) -> u64 {
        self.weekdays.total()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_is_all_zero() {
        let h = TimeHistogram::new();
        assert_eq!(h.total(), 0);
        let counts: Vec<u64> = h.iter().map(|(_, c)| c).collect();
        assert_eq!(counts, vec![0, 0, 0, 0]);
    }

    #[test]
    fn iter_follows_display_order() {
        let h = WeekdayHistogram::new();
        let labels: Vec<&str> = h.iter().map(|(k, _)| k.label()).collect();
        assert_eq!(
            labels,
            vec!["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"]
        );
    }

    #[test]
    fn merge_sums_keywise() {
        let mut a = CommitHistograms::new();
        a.record((Weekday::Mon, TimeOfDay::Night));
        a.record((Weekday::Mon, TimeOfDay::Morning));

        let mut b = CommitHistograms::new();
        b.record((Weekday::Sun, TimeOfDay::Night));

        a.merge(&b);
        assert_eq!(a.total(), 3);
        assert_eq!(a.times.total(), 3);
        assert_eq!(a.weekdays.get(Weekday::Mon), 2);
        assert_eq!(a.weekdays.get(Weekday::Sun), 1);
        assert_eq!(a.times.get(TimeOfDay::Night), 2);
        assert_eq!(a.times.get(TimeOfDay::Morning), 1);
        assert_eq!(a.times.get(TimeOfDay::Evening), 0);
    }
}
