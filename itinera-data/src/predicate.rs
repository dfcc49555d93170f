use crate::descriptor::ColumnMap;
use crate::error::DataError;
use crate::filter::Filter;
use crate::statement::Dialect;
use crate::value::FilterValue;

/// A rendered WHERE body plus its bind values.
///
/// `sql` never contains the `WHERE` keyword and never contains a filter
/// value; every value travels in `params`, in clause order.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub sql: String,
    pub params: Vec<FilterValue>,
}

/// Build the conjunction for `filter` against an entity's column map.
///
/// Clauses are emitted in sorted key order, so equal filters always render
/// the same text. The key name selects the operator:
///
/// * `keyword` compares with `LIKE`; the bound value is wrapped in `%`
///   wildcards and must be text,
/// * a `min` prefix (with a non-empty remainder) compares with `>=`,
/// * a `max` prefix compares with `<=`,
/// * anything else compares with `=`; a null value renders `IS NULL`
///   and binds nothing.
///
/// Keys absent from the map are rejected with [`DataError::UnknownKey`]
/// rather than dropped, so a misspelled filter key fails loudly instead
/// of silently widening the result set.
pub fn build_predicate(
    filter: &Filter,
    columns: &ColumnMap,
    entity: &'static str,
    dialect: Dialect,
    start_index: usize,
) -> Result<Option<Predicate>, DataError> {
    if filter.is_empty() {
        return Ok(None);
    }

    let mut sql = String::new();
    let mut params = Vec::with_capacity(filter.len());
    let mut index = start_index;

    for (key, value) in filter.iter() {
        let column = columns.resolve(key).ok_or_else(|| DataError::UnknownKey {
            entity,
            key: key.to_string(),
        })?;

        if !sql.is_empty() {
            sql.push_str(" AND ");
        }

        match operator_for(key) {
            Operator::Keyword => {
                let text = value.as_text().ok_or_else(|| {
                    DataError::validation(format!(
                        "keyword filter on {entity} requires text, got {}",
                        value.type_label()
                    ))
                })?;
                sql.push_str(column);
                sql.push_str(" LIKE ");
                sql.push_str(&dialect.placeholder(index));
                params.push(FilterValue::Text(format!("%{text}%")));
                index += 1;
            }
            Operator::Min | Operator::Max if value == &FilterValue::Null => {
                return Err(DataError::validation(format!(
                    "range filter '{key}' on {entity} cannot be null"
                )));
            }
            Operator::Min => {
                sql.push_str(column);
                sql.push_str(" >= ");
                sql.push_str(&dialect.placeholder(index));
                params.push(value.clone());
                index += 1;
            }
            Operator::Max => {
                sql.push_str(column);
                sql.push_str(" <= ");
                sql.push_str(&dialect.placeholder(index));
                params.push(value.clone());
                index += 1;
            }
            Operator::Equals if value == &FilterValue::Null => {
                sql.push_str(column);
                sql.push_str(" IS NULL");
            }
            Operator::Equals => {
                sql.push_str(column);
                sql.push_str(" = ");
                sql.push_str(&dialect.placeholder(index));
                params.push(value.clone());
                index += 1;
            }
        }
    }

    Ok(Some(Predicate { sql, params }))
}

enum Operator {
    Keyword,
    Min,
    Max,
    Equals,
}

fn operator_for(key: &str) -> Operator {
    if key == "keyword" {
        Operator::Keyword
    } else if key.len() > 3 && key.starts_with("min") {
        Operator::Min
    } else if key.len() > 3 && key.starts_with("max") {
        Operator::Max
    } else {
        Operator::Equals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::EntityDescriptor;

    struct Tour {
        id: i64,
    }

    fn columns() -> ColumnMap {
        let desc = EntityDescriptor::builder("tours", "t")
            .column("country", "loc.country")
            .column("keyword", "t.name")
            .column("maxPrice", "t.price")
            .column("min", "t.price")
            .column("minPrice", "t.price")
            .column("name", "t.name")
            .join(crate::join::JoinSpec::inner(
                "locations",
                "loc",
                "loc.id = t.location_id",
            ))
            .id_accessors(|e: &Tour| e.id, |e, id| e.id = id)
            .bind_with(|_| Vec::new())
            .build();
        desc.columns().clone()
    }

    fn build(filter: &Filter, dialect: Dialect) -> Predicate {
        build_predicate(filter, &columns(), "tours", dialect, 1)
            .unwrap()
            .unwrap()
    }

    #[test]
    fn empty_filter_yields_no_predicate() {
        let out = build_predicate(&Filter::new(), &columns(), "tours", Dialect::Sqlite, 1).unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn clauses_follow_sorted_key_order() {
        let filter = Filter::new().with("name", "Paris").with("country", "France");
        let p = build(&filter, Dialect::Sqlite);
        assert_eq!(p.sql, "loc.country = ? AND t.name = ?");
        assert_eq!(p.params, vec!["France".into(), "Paris".into()]);
    }

    #[test]
    fn min_max_prefixes_become_range_bounds() {
        let filter = Filter::new().with("minPrice", 80i64).with("maxPrice", 120i64);
        let p = build(&filter, Dialect::Sqlite);
        assert_eq!(p.sql, "t.price <= ? AND t.price >= ?");
        assert_eq!(p.params, vec![120i64.into(), 80i64.into()]);
    }

    #[test]
    fn keyword_wraps_bound_value_not_sql() {
        let filter = Filter::new().with("keyword", "par");
        let p = build(&filter, Dialect::Sqlite);
        assert_eq!(p.sql, "t.name LIKE ?");
        assert_eq!(p.params, vec!["%par%".into()]);
    }

    #[test]
    fn keyword_rejects_non_text() {
        let filter = Filter::new().with("keyword", 42i64);
        let err = build_predicate(&filter, &columns(), "tours", Dialect::Sqlite, 1).unwrap_err();
        assert!(matches!(err, DataError::Validation(_)));
    }

    #[test]
    fn bare_min_key_is_plain_equality() {
        let filter = Filter::new().with("min", 5i64);
        let p = build(&filter, Dialect::Sqlite);
        assert_eq!(p.sql, "t.price = ?");
    }

    #[test]
    fn null_equality_renders_is_null_without_param() {
        let filter = Filter::new().with("country", FilterValue::Null);
        let p = build(&filter, Dialect::Sqlite);
        assert_eq!(p.sql, "loc.country IS NULL");
        assert!(p.params.is_empty());
    }

    #[test]
    fn unknown_key_is_rejected_not_dropped() {
        let filter = Filter::new().with("countryy", "France");
        let err = build_predicate(&filter, &columns(), "tours", Dialect::Sqlite, 1).unwrap_err();
        match err {
            DataError::UnknownKey { entity, key } => {
                assert_eq!(entity, "tours");
                assert_eq!(key, "countryy");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn postgres_numbers_placeholders_from_start_index() {
        let filter = Filter::new().with("country", "France").with("keyword", "par");
        let p = build(&filter, Dialect::Postgres);
        assert_eq!(p.sql, "loc.country = $1 AND t.name LIKE $2");
    }

    #[test]
    fn equal_filters_render_identical_text() {
        let a = Filter::new().with("country", "France").with("minPrice", 10i64);
        let b = Filter::new().with("minPrice", 10i64).with("country", "France");
        assert_eq!(
            build(&a, Dialect::Sqlite).sql,
            build(&b, Dialect::Sqlite).sql
        );
    }
}
