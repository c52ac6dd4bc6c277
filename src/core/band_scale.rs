use std::borrow::Borrow;
use std::hash::Hash;

use indexmap::IndexSet;

/// Discrete scale assigning one equal-width slot per key, in key order.
///
/// Padding is expressed in fractions of a step: `padding_inner` is the gap
/// between adjacent bands, `padding_outer` the gap before the first and after
/// the last band. Leftover space is split evenly on both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale<K: Hash + Eq> {
    keys: IndexSet<K>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl<K: Hash + Eq> BandScale<K> {
    /// Builds a scale over `keys`. Duplicate keys keep their first slot.
    pub fn new(keys: impl IntoIterator<Item = K>, range: (f64, f64)) -> Self {
        let mut scale = Self {
            keys: keys.into_iter().collect(),
            range,
            padding_inner: 0.0,
            padding_outer: 0.0,
            start: 0.0,
            step: 0.0,
            bandwidth: 0.0,
        };
        scale.rescale();
        scale
    }

    /// Sets inner and outer padding to the same value.
    #[must_use]
    pub fn padding(mut self, padding: f64) -> Self {
        self.padding_inner = sanitize_inner(padding);
        self.padding_outer = sanitize_outer(padding);
        self.rescale();
        self
    }

    #[must_use]
    pub fn padding_inner(mut self, padding: f64) -> Self {
        self.padding_inner = sanitize_inner(padding);
        self.rescale();
        self
    }

    #[must_use]
    pub fn padding_outer(mut self, padding: f64) -> Self {
        self.padding_outer = sanitize_outer(padding);
        self.rescale();
        self
    }

    /// Width of one band.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Distance between the starts of adjacent bands.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn domain(&self) -> impl Iterator<Item = &K> {
        self.keys.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Start of the band for `key`, or `None` for keys outside the domain.
    pub fn position<Q>(&self, key: &Q) -> Option<f64>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.keys
            .get_index_of(key)
            .map(|index| self.start + self.step * index as f64)
    }

    /// Like [`BandScale::position`] but unknown keys resolve to `0.0`.
    pub fn position_or_default<Q>(&self, key: &Q) -> f64
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.position(key).unwrap_or(0.0)
    }

    /// Key whose full step contains `pixel`, if any.
    pub fn key_at(&self, pixel: f64) -> Option<&K> {
        if !pixel.is_finite() || self.step <= 0.0 {
            return None;
        }
        let slot_start = self.start - (self.step - self.bandwidth) / 2.0;
        let index = ((pixel - slot_start) / self.step).floor();
        if index < 0.0 {
            return None;
        }
        self.keys.get_index(index as usize)
    }

    fn rescale(&mut self) {
        let n = self.keys.len() as f64;
        let (r0, r1) = self.range;
        let (start, stop) = if r1 < r0 { (r1, r0) } else { (r0, r1) };

        let step = (stop - start) / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        self.start = start + (stop - start - step * (n - self.padding_inner)) * 0.5;
        self.step = step;
        self.bandwidth = step * (1.0 - self.padding_inner);
    }
}

fn sanitize_inner(padding: f64) -> f64 {
    if padding.is_finite() {
        padding.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn sanitize_outer(padding: f64) -> f64 {
    if padding.is_finite() {
        padding.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::BandScale;

    #[test]
    fn unpadded_bands_tile_the_range() {
        let scale = BandScale::new(["a", "b", "c", "d"], (0.0, 100.0));
        assert_eq!(scale.step(), 25.0);
        assert_eq!(scale.bandwidth(), 25.0);
        assert_eq!(scale.position("c"), Some(50.0));
        assert_eq!(scale.position("z"), None);
        assert_eq!(scale.position_or_default("z"), 0.0);
    }

    #[test]
    fn symmetric_padding_centres_the_bands() {
        let scale = BandScale::new(["a", "b"], (0.0, 120.0)).padding(0.5);
        // step = 120 / (2 - 0.5 + 1) = 48, leftover split evenly.
        assert!((scale.step() - 48.0).abs() <= 1e-9);
        assert!((scale.bandwidth() - 24.0).abs() <= 1e-9);
        assert!((scale.position_or_default("a") - 24.0).abs() <= 1e-9);
        assert!((scale.position_or_default("b") - 72.0).abs() <= 1e-9);
    }

    #[test]
    fn half_inner_quarter_outer_padding_centres_bars_in_slots() {
        let scale = BandScale::new([1, 2, 3, 4], (40.0, 440.0))
            .padding_inner(0.5)
            .padding_outer(0.25);
        assert!((scale.step() - 100.0).abs() <= 1e-9);
        assert!((scale.bandwidth() - 50.0).abs() <= 1e-9);
        assert!((scale.position_or_default(&1) - 65.0).abs() <= 1e-9);
        assert_eq!(scale.key_at(40.0), Some(&1));
        assert_eq!(scale.key_at(139.9), Some(&1));
        assert_eq!(scale.key_at(140.0), Some(&2));
        assert_eq!(scale.key_at(439.0), Some(&4));
        assert_eq!(scale.key_at(440.0), None);
        assert_eq!(scale.key_at(39.0), None);
    }

    #[test]
    fn empty_domain_is_harmless() {
        let scale = BandScale::<String>::new(Vec::new(), (0.0, 100.0)).padding(0.3);
        assert!(scale.is_empty());
        assert_eq!(scale.key_at(10.0), None);
        assert!(scale.bandwidth().is_finite());
    }
}
