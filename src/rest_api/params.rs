//! # Query Parameter Parser
//!
//! Parses list and count query strings into criteria and page requests.
//!
//! - Filters: `<field>.<operator>=<raw>`, e.g. `height.greaterThan=10`
//! - `in` / `notIn` take comma-separated operands
//! - Instants are RFC 3339
//! - Paging: `page`, `size`, repeatable `sort=<field>[,asc|desc]`

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use super::errors::{RestError, RestResult};
use crate::config::PaginationConfig;
use crate::criteria::{AlbumCriteria, Criteria, PhotoCriteria, TagCriteria};
use crate::executor::PageRequest;
use crate::filter::{Filter, FilterValue, RangeFilter, StringFilter};
use crate::planner::{SortDirection, SortSpec};

/// Parameters that never name a filter
pub const RESERVED_PARAMS: &[&str] = &["page", "size", "sort", "eagerload"];

/// Operand parsing for one filter value type
pub trait ParseValue: FilterValue {
    fn parse_value(raw: &str) -> Result<Self, String>;
}

impl ParseValue for bool {
    fn parse_value(raw: &str) -> Result<Self, String> {
        match raw.trim() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(format!("'{}' is not a boolean", other)),
        }
    }
}

impl ParseValue for i32 {
    fn parse_value(raw: &str) -> Result<Self, String> {
        raw.trim()
            .parse()
            .map_err(|_| format!("'{}' is not a 32-bit integer", raw))
    }
}

impl ParseValue for i64 {
    fn parse_value(raw: &str) -> Result<Self, String> {
        raw.trim()
            .parse()
            .map_err(|_| format!("'{}' is not a 64-bit integer", raw))
    }
}

impl ParseValue for String {
    fn parse_value(raw: &str) -> Result<Self, String> {
        Ok(raw.to_string())
    }
}

impl ParseValue for DateTime<Utc> {
    fn parse_value(raw: &str) -> Result<Self, String> {
        DateTime::parse_from_rfc3339(raw.trim())
            .map(|instant| instant.with_timezone(&Utc))
            .map_err(|_| format!("'{}' is not an RFC 3339 instant", raw))
    }
}

/// Parses a comma-separated operand list; an empty string is the empty set
fn parse_list<T: ParseValue>(raw: &str) -> Result<BTreeSet<T>, String> {
    if raw.is_empty() {
        return Ok(BTreeSet::new());
    }
    raw.split(',').map(T::parse_value).collect()
}

/// Sets one operator of a filter from its raw query operand
pub trait ParamFilter: Default {
    fn apply_param(&mut self, op: &str, raw: &str) -> Result<(), String>;
}

impl<T: ParseValue> ParamFilter for Filter<T> {
    fn apply_param(&mut self, op: &str, raw: &str) -> Result<(), String> {
        match op {
            "equals" => self.equals = Some(T::parse_value(raw)?),
            "notEquals" => self.not_equals = Some(T::parse_value(raw)?),
            "in" => self.in_set = Some(parse_list(raw)?),
            "notIn" => self.not_in = Some(parse_list(raw)?),
            "specified" => self.specified = Some(bool::parse_value(raw)?),
            _ => return Err(format!("operator '{}' is not supported", op)),
        }
        Ok(())
    }
}

impl<T: ParseValue> ParamFilter for RangeFilter<T> {
    fn apply_param(&mut self, op: &str, raw: &str) -> Result<(), String> {
        match op {
            "greaterThan" => self.greater_than = Some(T::parse_value(raw)?),
            "greaterThanOrEqual" => self.greater_than_or_equal = Some(T::parse_value(raw)?),
            "lessThan" => self.less_than = Some(T::parse_value(raw)?),
            "lessThanOrEqual" => self.less_than_or_equal = Some(T::parse_value(raw)?),
            _ => return self.base.apply_param(op, raw),
        }
        Ok(())
    }
}

impl ParamFilter for StringFilter {
    fn apply_param(&mut self, op: &str, raw: &str) -> Result<(), String> {
        match op {
            "contains" => self.contains = Some(raw.to_string()),
            "doesNotContain" => self.does_not_contain = Some(raw.to_string()),
            _ => return self.base.apply_param(op, raw),
        }
        Ok(())
    }
}

fn apply<F: ParamFilter>(slot: &mut Option<F>, op: &str, raw: &str) -> Result<(), String> {
    slot.get_or_insert_with(F::default).apply_param(op, raw)
}

fn unknown_field(field: &str) -> Result<(), String> {
    Err(format!("unknown field '{}'", field))
}

/// Builds a criteria value from query parameters
pub trait FromQueryParams: Criteria {
    /// Applies one `<field>.<op>=<raw>` parameter
    fn apply_param(&mut self, field: &str, op: &str, raw: &str) -> Result<(), String>;

    fn from_params(params: &[(String, String)]) -> RestResult<Self> {
        let mut criteria = Self::default();
        for (key, raw) in params {
            if RESERVED_PARAMS.contains(&key.as_str()) {
                continue;
            }
            let Some((field, op)) = key.split_once('.') else {
                return Err(RestError::InvalidQueryParam(format!(
                    "'{}' is not a filter parameter",
                    key
                )));
            };
            criteria
                .apply_param(field, op, raw)
                .map_err(|reason| RestError::InvalidFilter(format!("{}: {}", key, reason)))?;
        }
        Ok(criteria)
    }
}

impl FromQueryParams for PhotoCriteria {
    fn apply_param(&mut self, field: &str, op: &str, raw: &str) -> Result<(), String> {
        match field {
            "id" => apply(&mut self.id, op, raw),
            "title" => apply(&mut self.title, op, raw),
            "description" => apply(&mut self.description, op, raw),
            "height" => apply(&mut self.height, op, raw),
            "width" => apply(&mut self.width, op, raw),
            "taken" => apply(&mut self.taken, op, raw),
            "uploaded" => apply(&mut self.uploaded, op, raw),
            "albumId" => apply(&mut self.album_id, op, raw),
            "tagId" => apply(&mut self.tag_id, op, raw),
            _ => unknown_field(field),
        }
    }
}

impl FromQueryParams for AlbumCriteria {
    fn apply_param(&mut self, field: &str, op: &str, raw: &str) -> Result<(), String> {
        match field {
            "id" => apply(&mut self.id, op, raw),
            "title" => apply(&mut self.title, op, raw),
            "description" => apply(&mut self.description, op, raw),
            "created" => apply(&mut self.created, op, raw),
            "userId" => apply(&mut self.user_id, op, raw),
            _ => unknown_field(field),
        }
    }
}

impl FromQueryParams for TagCriteria {
    fn apply_param(&mut self, field: &str, op: &str, raw: &str) -> Result<(), String> {
        match field {
            "id" => apply(&mut self.id, op, raw),
            "name" => apply(&mut self.name, op, raw),
            "photoId" => apply(&mut self.photo_id, op, raw),
            _ => unknown_field(field),
        }
    }
}

/// Parses `page`, `size` and `sort` into a page request.
///
/// Sort fields must appear in `sortable`.
pub fn parse_page_request(
    params: &[(String, String)],
    pagination: &PaginationConfig,
    sortable: &[&str],
) -> RestResult<PageRequest> {
    let mut page = 0;
    let mut size = None;
    let mut sort = Vec::new();

    for (key, raw) in params {
        match key.as_str() {
            "page" => page = parse_number(key, raw)?,
            "size" => size = Some(parse_number(key, raw)?),
            "sort" => sort.push(parse_sort(raw, sortable)?),
            _ => {}
        }
    }

    let mut request = PageRequest::of(page, pagination.page_size(size));
    request.sort = sort;
    Ok(request)
}

fn parse_number(key: &str, raw: &str) -> RestResult<u32> {
    raw.trim().parse().map_err(|_| {
        RestError::InvalidQueryParam(format!("{} must be a non-negative integer, got '{}'", key, raw))
    })
}

/// Parses `field[,asc|desc]`
fn parse_sort(raw: &str, sortable: &[&str]) -> RestResult<SortSpec> {
    let (field, direction) = match raw.split_once(',') {
        Some((field, direction)) => (field.trim(), direction.trim()),
        None => (raw.trim(), "asc"),
    };

    if !sortable.contains(&field) {
        return Err(RestError::InvalidQueryParam(format!(
            "cannot sort by '{}'",
            field
        )));
    }

    let direction = match direction.to_ascii_lowercase().as_str() {
        "asc" => SortDirection::Asc,
        "desc" => SortDirection::Desc,
        other => {
            return Err(RestError::InvalidQueryParam(format!(
                "sort direction must be asc or desc, got '{}'",
                other
            )))
        }
    };

    Ok(SortSpec {
        field: field.to_string(),
        direction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{IntegerFilter, LongFilter, StringFilter};
    use chrono::TimeZone;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_photo_criteria_from_params() {
        let criteria = PhotoCriteria::from_params(&params(&[
            ("height.equals", "10"),
            ("width.greaterThanOrEqual", "20"),
            ("tagId.in", "8,7"),
            ("description.specified", "false"),
            ("title.contains", "sea"),
        ]))
        .unwrap();

        let expected = PhotoCriteria::new()
            .with_height(IntegerFilter::new().with_equals(10))
            .with_width(IntegerFilter::new().with_greater_than_or_equal(20))
            .with_tag_id(LongFilter::new().with_in([7, 8]))
            .with_description(StringFilter::new().with_specified(false))
            .with_title(StringFilter::new().with_contains("sea"));
        assert_eq!(criteria, expected);
    }

    #[test]
    fn test_operators_on_one_field_accumulate() {
        let criteria = TagCriteria::from_params(&params(&[
            ("photoId.greaterThan", "1"),
            ("photoId.lessThan", "9"),
        ]))
        .unwrap();

        assert_eq!(
            criteria.photo_id,
            Some(LongFilter::new().with_greater_than(1).with_less_than(9))
        );
    }

    #[test]
    fn test_instant_operand() {
        let criteria =
            AlbumCriteria::from_params(&params(&[("created.lessThan", "2024-05-01T10:00:00Z")]))
                .unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        assert_eq!(criteria.created.unwrap().less_than, Some(expected));
    }

    #[test]
    fn test_paging_params_ignored_by_criteria() {
        let criteria =
            TagCriteria::from_params(&params(&[("page", "2"), ("size", "5"), ("sort", "name")]))
                .unwrap();
        assert_eq!(criteria, TagCriteria::new());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = PhotoCriteria::from_params(&params(&[("colour.equals", "red")])).unwrap_err();
        assert_eq!(err.code(), "GALLERY_INVALID_FILTER");
        assert!(err.to_string().contains("colour"));
    }

    #[test]
    fn test_unsupported_operator_rejected() {
        let err = TagCriteria::from_params(&params(&[("id.contains", "1")])).unwrap_err();
        assert!(err.to_string().contains("not supported"));

        let err = TagCriteria::from_params(&params(&[("name.greaterThan", "a")])).unwrap_err();
        assert_eq!(err.code(), "GALLERY_INVALID_FILTER");
    }

    #[test]
    fn test_bad_operand_rejected() {
        let err = PhotoCriteria::from_params(&params(&[("height.equals", "tall")])).unwrap_err();
        assert!(err.to_string().contains("tall"));

        let err = PhotoCriteria::from_params(&params(&[("tagId.in", "7,x")])).unwrap_err();
        assert_eq!(err.code(), "GALLERY_INVALID_FILTER");

        let err = PhotoCriteria::from_params(&params(&[("title.specified", "yes")])).unwrap_err();
        assert_eq!(err.code(), "GALLERY_INVALID_FILTER");
    }

    #[test]
    fn test_undotted_param_rejected() {
        let err = PhotoCriteria::from_params(&params(&[("height", "10")])).unwrap_err();
        assert_eq!(err.code(), "GALLERY_INVALID_QUERY_PARAM");
    }

    #[test]
    fn test_page_request() {
        let request = parse_page_request(
            &params(&[("page", "2"), ("size", "5"), ("sort", "title,desc"), ("sort", "id")]),
            &PaginationConfig::default(),
            &["id", "title"],
        )
        .unwrap();

        assert_eq!(request.page, 2);
        assert_eq!(request.size, 5);
        assert_eq!(request.sort, vec![SortSpec::desc("title"), SortSpec::asc("id")]);
    }

    #[test]
    fn test_page_request_defaults_and_cap() {
        let pagination = PaginationConfig {
            default_page_size: 20,
            max_page_size: 100,
        };
        let request = parse_page_request(&[], &pagination, &["id"]).unwrap();
        assert_eq!((request.page, request.size), (0, 20));

        let request = parse_page_request(&params(&[("size", "5000")]), &pagination, &["id"]).unwrap();
        assert_eq!(request.size, 100);
    }

    #[test]
    fn test_bad_paging_rejected() {
        let pagination = PaginationConfig::default();
        assert!(parse_page_request(&params(&[("page", "-1")]), &pagination, &["id"]).is_err());
        assert!(parse_page_request(&params(&[("sort", "secret")]), &pagination, &["id"]).is_err());
        assert!(parse_page_request(&params(&[("sort", "id,up")]), &pagination, &["id"]).is_err());
    }
}
