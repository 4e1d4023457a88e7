//! Result sorting for query execution
//!
//! Sorts by any number of columns, then by identifier, so the order is
//! total and page boundaries are deterministic.

use std::cmp::Ordering;

use crate::domain::Entity;
use crate::filter::Value;
use crate::planner::{SortDirection, SortSpec, ID_FIELD};

/// Sorts entity results
pub struct ResultSorter;

impl ResultSorter {
    /// Sorts entities according to the sort specifications, in priority order.
    ///
    /// Ties on every key fall back to ascending identifier.
    pub fn sort<E: Entity>(entities: &mut [E], specs: &[SortSpec]) {
        entities.sort_by(|a, b| Self::compare(a, b, specs));
    }

    fn compare<E: Entity>(a: &E, b: &E, specs: &[SortSpec]) -> Ordering {
        for spec in specs {
            let ordering = Self::compare_values(a.field(&spec.field), b.field(&spec.field));
            let ordering = match spec.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Self::compare_values(a.field(ID_FIELD), b.field(ID_FIELD))
    }

    /// Compares two column values for sorting.
    ///
    /// Ordering rules:
    /// - null sorts before any value
    /// - same types use natural ordering
    /// - mixed types fall back to the variant order
    fn compare_values(a: Option<Value>, b: Option<Value>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a_val), Some(b_val)) => a_val.compare(&b_val).unwrap_or_else(|| a_val.cmp(&b_val)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Photo;

    fn make_photo(id: i64, title: &str, height: Option<i32>) -> Photo {
        Photo {
            id: Some(id),
            height,
            ..Photo::new(title)
        }
    }

    fn ids(photos: &[Photo]) -> Vec<i64> {
        photos.iter().filter_map(|p| p.id).collect()
    }

    #[test]
    fn test_sort_ascending() {
        let mut photos = vec![
            make_photo(1, "c", Some(30)),
            make_photo(2, "a", Some(20)),
            make_photo(3, "b", Some(25)),
        ];

        ResultSorter::sort(&mut photos, &[SortSpec::asc("height")]);
        assert_eq!(ids(&photos), vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_descending() {
        let mut photos = vec![
            make_photo(1, "c", Some(30)),
            make_photo(2, "a", Some(20)),
            make_photo(3, "b", Some(25)),
        ];

        ResultSorter::sort(&mut photos, &[SortSpec::desc("title")]);
        assert_eq!(ids(&photos), vec![1, 3, 2]);
    }

    #[test]
    fn test_null_sorts_first() {
        let mut photos = vec![make_photo(1, "a", Some(5)), make_photo(2, "b", None)];

        ResultSorter::sort(&mut photos, &[SortSpec::asc("height")]);
        assert_eq!(ids(&photos), vec![2, 1]);
    }

    #[test]
    fn test_ties_break_on_id() {
        let mut photos = vec![
            make_photo(3, "same", Some(1)),
            make_photo(1, "same", Some(1)),
            make_photo(2, "same", Some(1)),
        ];

        ResultSorter::sort(&mut photos, &[SortSpec::desc("height")]);
        assert_eq!(ids(&photos), vec![1, 2, 3]);
    }

    #[test]
    fn test_secondary_key() {
        let mut photos = vec![
            make_photo(1, "b", Some(10)),
            make_photo(2, "a", Some(10)),
            make_photo(3, "c", Some(5)),
        ];

        ResultSorter::sort(
            &mut photos,
            &[SortSpec::desc("height"), SortSpec::asc("title")],
        );
        assert_eq!(ids(&photos), vec![2, 1, 3]);
    }

    #[test]
    fn test_no_specs_sorts_by_id() {
        let mut photos = vec![make_photo(9, "x", None), make_photo(4, "y", None)];
        ResultSorter::sort(&mut photos, &[]);
        assert_eq!(ids(&photos), vec![4, 9]);
    }
}
