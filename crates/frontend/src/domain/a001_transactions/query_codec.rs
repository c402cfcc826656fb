//! URL query string <-> `Query`
//!
//! The URL and the search API carry dates as ISO-8601 strings
//! (`QueryParams`); the page works with calendar dates (`Query`).
//! Every function here returns a new value and leaves its input untouched.

use super::error::CodecError;
use super::query::{DateRange, Query};
use crate::shared::date_utils::{parse_iso_datetime, to_iso_string};
use contracts::domain::a001_transactions::{IsoDates, QueryParams};

/// `sort[field][N]` is the deepest key we produce
const MAX_DEPTH: usize = 5;

fn qs_config() -> serde_qs::Config {
    // Non-strict: browsers may hand us percent-encoded brackets
    serde_qs::Config::new(MAX_DEPTH, false)
}

/// Parse `?search=foo&offset=2&count=10` (leading `?` optional)
pub fn decode(raw: &str) -> Result<Query, CodecError> {
    let raw = raw.trim();
    let raw = raw.strip_prefix('?').unwrap_or(raw);
    if raw.is_empty() {
        return Err(CodecError::Empty);
    }

    let params: QueryParams = qs_config()
        .deserialize_str(raw)
        .map_err(|e| CodecError::Malformed(e.to_string()))?;

    to_calendar_dates(&params)
}

/// Like `decode`, but an empty or malformed string yields the retained query
pub fn decode_or(raw: &str, retained: &Query) -> Query {
    match decode(raw) {
        Ok(query) => query,
        Err(CodecError::Empty) => {
            log::debug!("Empty query string, keeping retained query");
            retained.clone()
        }
        Err(e) => {
            log::warn!("Ignoring query string '{}': {}", raw, e);
            retained.clone()
        }
    }
}

/// Serialize to a query string without the leading `?`.
/// An empty `dates` object produces no `dates[...]` parameters at all.
pub fn encode(params: &QueryParams) -> Result<String, CodecError> {
    serde_qs::to_string(params).map_err(|e| CodecError::Encode(e.to_string()))
}

/// ISO strings -> calendar dates. No dates means no conversion at all.
pub fn to_calendar_dates(params: &QueryParams) -> Result<Query, CodecError> {
    if params.offset == 0 || params.count == 0 {
        return Err(CodecError::InvalidPagination {
            offset: params.offset,
            count: params.count,
        });
    }

    let dates = match (&params.dates.start, &params.dates.end) {
        (None, None) => None,
        (Some(start), Some(end)) => Some(DateRange {
            start: parse_date(start)?,
            end: parse_date(end)?,
        }),
        _ => return Err(CodecError::HalfOpenDates),
    };

    Ok(Query {
        search: params.search.clone(),
        dates,
        filters: params.filters.clone(),
        sort: params.sort.clone(),
        offset: params.offset,
        count: params.count,
    })
}

/// Calendar dates -> ISO strings. Absent dates become an empty `{}` object.
pub fn to_iso_dates(query: &Query) -> QueryParams {
    let dates = match &query.dates {
        Some(range) => IsoDates {
            start: Some(to_iso_string(&range.start)),
            end: Some(to_iso_string(&range.end)),
        },
        None => IsoDates::default(),
    };

    QueryParams {
        search: query.search.clone(),
        dates,
        filters: query.filters.clone(),
        sort: query.sort.clone(),
        offset: query.offset,
        count: query.count,
    }
}

fn parse_date(value: &str) -> Result<chrono::DateTime<chrono::Utc>, CodecError> {
    parse_iso_datetime(value).ok_or_else(|| CodecError::InvalidDate(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use contracts::domain::a001_transactions::{Sort, SortOrder};
    use std::collections::BTreeMap;

    fn query_with_dates() -> Query {
        Query {
            search: Some("joão silva".to_string()),
            dates: Some(DateRange {
                start: Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap(),
                end: Utc
                    .with_ymd_and_hms(2017, 1, 31, 23, 59, 59)
                    .unwrap()
                    + chrono::Duration::milliseconds(999),
            }),
            filters: Some(BTreeMap::from([
                ("payment_method".to_string(), "boleto".to_string()),
                ("status".to_string(), "paid".to_string()),
            ])),
            sort: Some(Sort {
                field: vec!["payment".to_string(), "paid_amount".to_string()],
                order: SortOrder::Desc,
            }),
            offset: 3,
            count: 30,
        }
    }

    #[test]
    fn test_decode_plain_query() {
        let query = decode("?search=foo&offset=2&count=10").unwrap();
        assert_eq!(
            query,
            Query {
                search: Some("foo".to_string()),
                offset: 2,
                count: 10,
                ..Query::default()
            }
        );
    }

    #[test]
    fn test_round_trip_with_dates() {
        let query = query_with_dates();
        let encoded = encode(&to_iso_dates(&query)).unwrap();
        assert_eq!(decode(&encoded).unwrap(), query);
        assert_eq!(decode(&format!("?{}", encoded)).unwrap(), query);
    }

    #[test]
    fn test_empty_dates_encode_as_empty_object() {
        let query = Query {
            search: Some("foo".to_string()),
            ..Query::default()
        };
        let params = to_iso_dates(&query);
        assert_eq!(params.dates, IsoDates::default());
        assert!(params.dates.is_empty());

        let encoded = encode(&params).unwrap();
        assert!(!encoded.contains("dates"), "unexpected dates in {}", encoded);

        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded.dates, None);
        assert_eq!(decoded, query);
    }

    #[test]
    fn test_to_iso_dates_does_not_touch_other_fields() {
        let query = query_with_dates();
        let params = to_iso_dates(&query);
        assert_eq!(params.dates.start.as_deref(), Some("2017-01-01T00:00:00.000Z"));
        assert_eq!(params.dates.end.as_deref(), Some("2017-01-31T23:59:59.999Z"));
        assert_eq!(params.search, query.search);
        assert_eq!(params.filters, query.filters);
        assert_eq!(params.sort, query.sort);
        assert_eq!((params.offset, params.count), (3, 30));
    }

    #[test]
    fn test_half_open_dates_rejected() {
        let params = QueryParams {
            dates: IsoDates {
                start: Some("2017-01-01T00:00:00.000Z".to_string()),
                end: None,
            },
            ..QueryParams::default()
        };
        assert_eq!(to_calendar_dates(&params), Err(CodecError::HalfOpenDates));
    }

    #[test]
    fn test_invalid_date_rejected() {
        let result = decode("dates[start]=soon&dates[end]=later&offset=1&count=10");
        assert_eq!(result, Err(CodecError::InvalidDate("soon".to_string())));
    }

    #[test]
    fn test_invalid_pagination_rejected() {
        assert!(matches!(
            decode("offset=0&count=10"),
            Err(CodecError::InvalidPagination { offset: 0, count: 10 })
        ));
        assert!(matches!(
            decode("offset=abc"),
            Err(CodecError::Malformed(_))
        ));
    }

    #[test]
    fn test_missing_pagination_defaults() {
        let query = decode("search=foo").unwrap();
        assert_eq!(query.offset, 1);
        assert_eq!(query.count, Query::default().count);
    }

    #[test]
    fn test_decode_or_falls_back_to_retained() {
        let retained = query_with_dates();
        assert_eq!(decode_or("", &retained), retained);
        assert_eq!(decode_or("?", &retained), retained);
        assert_eq!(decode_or("offset=0", &retained), retained);
        assert_eq!(decode_or("search=bar", &retained).search.as_deref(), Some("bar"));
    }

    #[test]
    fn test_decode_accepts_encoded_brackets() {
        let query = decode("sort%5Bfield%5D%5B0%5D=id&sort%5Border%5D=asc&offset=1&count=15").unwrap();
        assert_eq!(
            query.sort,
            Some(Sort {
                field: vec!["id".to_string()],
                order: SortOrder::Asc,
            })
        );
    }
}
