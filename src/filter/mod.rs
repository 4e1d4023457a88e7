//! Typed field filters
//!
//! A filter is a small conjunction of optional operators applied to one
//! field. The operator set is fixed by the filter type:
//!
//! - [`Filter<T>`]: equals, notEquals, in, notIn, specified
//! - [`RangeFilter<T>`]: the above plus greaterThan/greaterThanOrEqual/
//!   lessThan/lessThanOrEqual, for ordered domains
//! - [`StringFilter`]: the base operators plus contains/doesNotContain
//!
//! A filter with every slot empty means "no constraint" and compiles to
//! nothing, exactly like an absent filter.

/// Generates the base operator builders for a filter that wraps a
/// [`Filter`] in a field named `base`.
macro_rules! base_builders {
    ($value:ty) => {
        /// Sets the `equals` operand
        pub fn with_equals(mut self, value: $value) -> Self {
            self.base.equals = Some(value);
            self
        }

        /// Sets the `notEquals` operand
        pub fn with_not_equals(mut self, value: $value) -> Self {
            self.base.not_equals = Some(value);
            self
        }

        /// Sets the `in` operand
        pub fn with_in(mut self, values: impl IntoIterator<Item = $value>) -> Self {
            self.base.in_set = Some(values.into_iter().collect());
            self
        }

        /// Sets the `notIn` operand
        pub fn with_not_in(mut self, values: impl IntoIterator<Item = $value>) -> Self {
            self.base.not_in = Some(values.into_iter().collect());
            self
        }

        /// Sets the `specified` operand
        pub fn with_specified(mut self, specified: bool) -> Self {
            self.base.specified = Some(specified);
            self
        }
    };
}

mod base;
mod constraint;
mod range;
mod string;
mod value;

pub use base::{BooleanFilter, Filter};
pub use constraint::{Constraint, FieldFilter};
pub use range::{InstantFilter, IntegerFilter, LongFilter, RangeFilter};
pub use string::StringFilter;
pub use value::{FilterValue, Value};
