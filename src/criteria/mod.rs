//! Per-entity filter aggregates
//!
//! A criteria value is a flat record of independently optional filters, one
//! per queryable column plus one per joinable association. The compiler
//! never sees the concrete struct: it folds over the [`Criterion`] sequence
//! returned by [`Criteria::criteria`].
//!
//! Absent filters are left out of the sequence. Empty filters are kept; the
//! compiler drops them.

mod album;
mod photo;
mod tag;

pub use album::AlbumCriteria;
pub use photo::PhotoCriteria;
pub use tag::TagCriteria;

use std::fmt;
use std::hash::Hash;

use crate::domain::{Entity, Relation};
use crate::filter::FieldFilter;

/// One populated criteria field
#[derive(Debug, Clone, Copy)]
pub enum Criterion<'a> {
    /// Constraint on a column of the queried entity
    Scalar {
        field: &'static str,
        filter: &'a dyn FieldFilter,
    },
    /// Constraint on the identifier of an entity reached through `relation`
    Relation {
        relation: Relation,
        filter: &'a dyn FieldFilter,
    },
}

impl Criterion<'_> {
    /// Returns the filter carried by this criterion
    pub fn filter(&self) -> &dyn FieldFilter {
        match self {
            Criterion::Scalar { filter, .. } | Criterion::Relation { filter, .. } => *filter,
        }
    }
}

/// Filter aggregate for one entity type
pub trait Criteria:
    Clone + Default + PartialEq + Eq + Hash + fmt::Debug + Send + Sync + 'static
{
    type Entity: Entity;

    /// Returns every present filter, scalar fields first, then relations
    fn criteria(&self) -> Vec<Criterion<'_>>;

    /// Returns an independent deep copy
    fn copy(&self) -> Self {
        self.clone()
    }

    /// Returns true if no filter is present
    fn is_unconstrained(&self) -> bool {
        self.criteria().iter().all(|c| c.filter().is_empty())
    }
}

pub(crate) fn push_scalar<'a, F: FieldFilter>(
    out: &mut Vec<Criterion<'a>>,
    field: &'static str,
    filter: &'a Option<F>,
) {
    if let Some(filter) = filter {
        out.push(Criterion::Scalar { field, filter });
    }
}

pub(crate) fn push_relation<'a, F: FieldFilter>(
    out: &mut Vec<Criterion<'a>>,
    relation: Relation,
    filter: &'a Option<F>,
) {
    if let Some(filter) = filter {
        out.push(Criterion::Relation { relation, filter });
    }
}
