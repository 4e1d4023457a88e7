//! Criteria query execution
//!
//! Compiles a criteria value once per call, hands the condition to the
//! repository, and logs the pair of QUERY_BEGIN and QUERY_COMPLETE events.

use std::marker::PhantomData;
use std::sync::Arc;

use super::errors::ServiceResult;
use crate::criteria::Criteria;
use crate::domain::Entity;
use crate::executor::{Page, PageRequest};
use crate::observability::{MetricsRegistry, QueryScope};
use crate::planner::{Condition, ExplainCondition, PredicateCompiler};
use crate::storage::{QueryRepository, StoreResult};

/// Read-only query service for one criteria type
pub struct QueryService<C, R>
where
    C: Criteria,
    R: QueryRepository<C::Entity>,
{
    repository: Arc<R>,
    metrics: Arc<MetricsRegistry>,
    _criteria: PhantomData<fn() -> C>,
}

impl<C, R> QueryService<C, R>
where
    C: Criteria,
    R: QueryRepository<C::Entity>,
{
    pub fn new(repository: Arc<R>, metrics: Arc<MetricsRegistry>) -> Self {
        Self {
            repository,
            metrics,
            _criteria: PhantomData,
        }
    }

    /// Returns every matching entity in ascending id order
    pub fn find_by_criteria(&self, criteria: &C) -> ServiceResult<Vec<C::Entity>> {
        let rows = self.run(criteria, "find", |condition| self.repository.find_all(condition), |rows| {
            rows.len() as u64
        })?;
        self.metrics.increment_queries();
        self.metrics.add_rows_returned(rows.len() as u64);
        Ok(rows)
    }

    /// Returns one sorted page of matching entities
    pub fn find_page_by_criteria(
        &self,
        criteria: &C,
        request: &PageRequest,
    ) -> ServiceResult<Page<C::Entity>> {
        let page = self.run(
            criteria,
            "page",
            |condition| self.repository.find_page(condition, request),
            |page| page.len() as u64,
        )?;
        self.metrics.increment_pages();
        self.metrics.add_rows_returned(page.len() as u64);
        Ok(page)
    }

    /// Counts matching entities
    pub fn count_by_criteria(&self, criteria: &C) -> ServiceResult<u64> {
        let count = self.run(criteria, "count", |condition| self.repository.count(condition), |n| *n)?;
        self.metrics.increment_counts();
        Ok(count)
    }

    fn run<T>(
        &self,
        criteria: &C,
        operation: &'static str,
        query: impl FnOnce(&Condition) -> StoreResult<T>,
        rows: impl FnOnce(&T) -> u64,
    ) -> ServiceResult<T> {
        let condition = PredicateCompiler::compile(Some(criteria));
        let explain = ExplainCondition::from_condition(&condition);
        let scope = QueryScope::begin(C::Entity::KIND.as_str(), operation, &explain);

        match query(&condition) {
            Ok(result) => {
                scope.complete(rows(&result));
                Ok(result)
            }
            Err(err) => {
                self.metrics.increment_queries_failed();
                scope.fail(err.code(), &err.to_string());
                Err(err.into())
            }
        }
    }
}
