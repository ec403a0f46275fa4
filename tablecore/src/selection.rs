//! Row selections: the set of row indices a filter matched.
use roaring::RoaringBitmap;
use std::ops::{BitAnd, BitOr, Sub};

/// An ordered, duplicate-free set of row indices backed by a roaring bitmap.
///
/// Selections are created fresh by each filter evaluation and combined in
/// place by the boolean combinators. Iteration always yields ascending
/// indices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
    bitmap: RoaringBitmap,
}

impl Selection {
    pub fn new() -> Self {
        Self {
            bitmap: RoaringBitmap::new(),
        }
    }

    pub fn from_bitmap(bitmap: RoaringBitmap) -> Self {
        Self { bitmap }
    }

    /// A selection holding every index in `start..end`.
    pub fn with_range(start: u32, end: u32) -> Self {
        let mut selection = Self::new();
        selection.add_range(start, end);
        selection
    }

    pub fn bitmap(&self) -> &RoaringBitmap {
        &self.bitmap
    }

    pub fn into_bitmap(self) -> RoaringBitmap {
        self.bitmap
    }

    pub fn add(&mut self, index: u32) -> &mut Self {
        self.bitmap.insert(index);
        self
    }

    /// Inserts the contiguous block `start..end` (exclusive end). An empty or
    /// inverted range inserts nothing.
    pub fn add_range(&mut self, start: u32, end: u32) -> &mut Self {
        if start < end {
            self.bitmap.insert_range(start..end);
        }
        self
    }

    pub fn contains(&self, index: u32) -> bool {
        self.bitmap.contains(index)
    }

    pub fn size(&self) -> usize {
        self.bitmap.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bitmap.is_empty()
    }

    /// Intersects with `other` in place.
    pub fn and(&mut self, other: &Selection) -> &mut Self {
        self.bitmap &= &other.bitmap;
        self
    }

    /// Unions with `other` in place.
    pub fn or(&mut self, other: &Selection) -> &mut Self {
        self.bitmap |= &other.bitmap;
        self
    }

    /// Removes every index present in `other`.
    pub fn and_not(&mut self, other: &Selection) -> &mut Self {
        self.bitmap -= &other.bitmap;
        self
    }

    /// The indices of `0..row_count` that are not in this selection.
    pub fn complement(&self, row_count: u32) -> Selection {
        let mut full = Selection::with_range(0, row_count);
        full.and_not(self);
        full
    }

    pub fn first(&self) -> Option<u32> {
        self.bitmap.min()
    }

    pub fn last(&self) -> Option<u32> {
        self.bitmap.max()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.bitmap.iter()
    }

    pub fn to_vec(&self) -> Vec<u32> {
        self.bitmap.iter().collect()
    }
}

impl FromIterator<u32> for Selection {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self::from_bitmap(iter.into_iter().collect())
    }
}

impl Extend<u32> for Selection {
    fn extend<I: IntoIterator<Item = u32>>(&mut self, iter: I) {
        self.bitmap.extend(iter)
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = u32;
    type IntoIter = roaring::bitmap::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.bitmap.iter()
    }
}

impl BitAnd for &Selection {
    type Output = Selection;

    fn bitand(self, rhs: Self) -> Selection {
        Selection::from_bitmap(&self.bitmap & &rhs.bitmap)
    }
}

impl BitOr for &Selection {
    type Output = Selection;

    fn bitor(self, rhs: Self) -> Selection {
        Selection::from_bitmap(&self.bitmap | &rhs.bitmap)
    }
}

impl Sub for &Selection {
    type Output = Selection;

    fn sub(self, rhs: Self) -> Selection {
        Selection::from_bitmap(&self.bitmap - &rhs.bitmap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_range_is_exclusive() {
        let selection = Selection::with_range(2, 5);
        assert_eq!(selection.to_vec(), vec![2, 3, 4]);
        assert_eq!(selection.size(), 3);
        assert!(!selection.contains(5));

        let mut empty = Selection::new();
        empty.add_range(5, 5).add_range(7, 3);
        assert!(empty.is_empty());
    }

    #[test]
    fn stays_ordered_and_deduplicated() {
        let mut selection: Selection = [9, 1, 4, 1, 9].into_iter().collect();
        selection.add(4).add(0);
        assert_eq!(selection.to_vec(), vec![0, 1, 4, 9]);
        assert_eq!(selection.first(), Some(0));
        assert_eq!(selection.last(), Some(9));
    }

    #[test]
    fn set_algebra() {
        let a: Selection = [1, 2, 3, 4].into_iter().collect();
        let b: Selection = [3, 4, 5].into_iter().collect();

        let mut and = a.clone();
        and.and(&b);
        assert_eq!(and.to_vec(), vec![3, 4]);

        let mut or = a.clone();
        or.or(&b);
        assert_eq!(or.to_vec(), vec![1, 2, 3, 4, 5]);

        let mut and_not = a.clone();
        and_not.and_not(&b);
        assert_eq!(and_not.to_vec(), vec![1, 2]);

        assert_eq!(&a & &b, and);
        assert_eq!(&a | &b, or);
        assert_eq!(&a - &b, and_not);
    }

    #[test]
    fn complement_within_row_count() {
        let selection: Selection = [0, 2].into_iter().collect();
        assert_eq!(selection.complement(4).to_vec(), vec![1, 3]);
        assert!(Selection::new().complement(0).is_empty());
    }
}
