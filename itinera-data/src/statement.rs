use crate::descriptor::{EntityDescriptor, LinkDescriptor};
use crate::error::DataError;
use crate::filter::Filter;
use crate::join::{resolve_joins, resolve_joins_ordered};
use crate::predicate::build_predicate;
use crate::value::FilterValue;

/// Placeholder style of the target engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `?` placeholders, no engine-specific syntax.
    Generic,
    Sqlite,
    MySql,
    /// `$1`, `$2`, ... numbered placeholders.
    Postgres,
}

impl Dialect {
    pub fn placeholder(&self, index: usize) -> String {
        match self {
            Dialect::Postgres => format!("${index}"),
            _ => "?".to_string(),
        }
    }
}

/// A complete statement: SQL text plus bind values in placeholder order.
///
/// The text is fully determined by descriptor declarations and filter
/// *keys*; filter *values* only ever appear in `params`.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<FilterValue>,
}

/// Optional listing modifiers for SELECT composition.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Logical key to order by; resolved through the column map like any
    /// filter key, so unmapped keys are rejected and a key behind a
    /// conditional join pulls that join into the statement.
    pub order_by: Option<String>,
    pub descending: bool,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl QueryOptions {
    pub fn ordered_by(key: impl Into<String>) -> Self {
        QueryOptions {
            order_by: Some(key.into()),
            ..QueryOptions::default()
        }
    }

    pub fn descending(mut self) -> Self {
        self.descending = true;
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Statement factory for one entity family.
///
/// Borrows the family descriptor and renders every statement the drivers
/// need. All composition is pure string work; nothing here touches a
/// connection.
pub struct EntityStatements<'d, T> {
    descriptor: &'d EntityDescriptor<T>,
    dialect: Dialect,
}

impl<'d, T> EntityStatements<'d, T> {
    pub fn new(descriptor: &'d EntityDescriptor<T>, dialect: Dialect) -> Self {
        EntityStatements { descriptor, dialect }
    }

    /// SELECT for `filter` with the minimal join set.
    ///
    /// Joins are included when always-on or when one of their trigger keys
    /// appears in the filter, in declaration order. A fanning join forces
    /// `DISTINCT` so link-table matches cannot duplicate base rows.
    pub fn select(&self, filter: &Filter) -> Result<Statement, DataError> {
        self.select_with(filter, &QueryOptions::default())
    }

    pub fn select_with(&self, filter: &Filter, options: &QueryOptions) -> Result<Statement, DataError> {
        let joins = resolve_joins_ordered(
            self.descriptor.joins(),
            filter,
            options.order_by.as_deref(),
        );
        let fans_out = joins.iter().any(|j| j.fan_out);

        let mut sql = String::from("SELECT ");
        if fans_out {
            sql.push_str("DISTINCT ");
        }
        sql.push_str(self.descriptor.alias());
        sql.push_str(".*");
        for join in &joins {
            for column in join.select {
                sql.push_str(", ");
                sql.push_str(column);
            }
        }
        sql.push_str(" FROM ");
        sql.push_str(self.descriptor.table());
        sql.push(' ');
        sql.push_str(self.descriptor.alias());
        for join in &joins {
            sql.push(' ');
            sql.push_str(&join.to_sql());
        }

        let mut params = Vec::new();
        if let Some(predicate) = build_predicate(
            filter,
            self.descriptor.columns(),
            self.descriptor.entity(),
            self.dialect,
            1,
        )? {
            sql.push_str(" WHERE ");
            sql.push_str(&predicate.sql);
            params = predicate.params;
        }

        if let Some(key) = &options.order_by {
            let column = self
                .descriptor
                .columns()
                .resolve(key)
                .ok_or_else(|| DataError::UnknownKey {
                    entity: self.descriptor.entity(),
                    key: key.clone(),
                })?;
            sql.push_str(" ORDER BY ");
            sql.push_str(column);
            if options.descending {
                sql.push_str(" DESC");
            }
        }
        if let Some(limit) = options.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = options.offset {
            sql.push_str(&format!(" OFFSET {offset}"));
        }

        Ok(Statement { sql, params })
    }

    /// Single-row lookup by identity, including always-on join columns.
    pub fn select_by_id(&self, id: i64) -> Statement {
        let joins = resolve_joins(self.descriptor.joins(), &Filter::new());

        let mut sql = String::from("SELECT ");
        sql.push_str(self.descriptor.alias());
        sql.push_str(".*");
        for join in &joins {
            for column in join.select {
                sql.push_str(", ");
                sql.push_str(column);
            }
        }
        sql.push_str(" FROM ");
        sql.push_str(self.descriptor.table());
        sql.push(' ');
        sql.push_str(self.descriptor.alias());
        for join in &joins {
            sql.push(' ');
            sql.push_str(&join.to_sql());
        }
        sql.push_str(" WHERE ");
        sql.push_str(self.descriptor.alias());
        sql.push('.');
        sql.push_str(self.descriptor.id_column());
        sql.push_str(" = ");
        sql.push_str(&self.dialect.placeholder(1));
        sql.push_str(" LIMIT 1");

        Statement {
            sql,
            params: vec![FilterValue::Int(id)],
        }
    }

    /// Row count for `filter`. Counts distinct identities when a fanning
    /// join is active, so the result matches what `select` would return.
    pub fn count(&self, filter: &Filter) -> Result<Statement, DataError> {
        let joins = resolve_joins(self.descriptor.joins(), filter);
        let fans_out = joins.iter().any(|j| j.fan_out);

        let mut sql = String::from("SELECT COUNT(");
        if fans_out {
            sql.push_str("DISTINCT ");
            sql.push_str(self.descriptor.alias());
            sql.push('.');
            sql.push_str(self.descriptor.id_column());
        } else {
            sql.push('*');
        }
        sql.push_str(") FROM ");
        sql.push_str(self.descriptor.table());
        sql.push(' ');
        sql.push_str(self.descriptor.alias());
        for join in &joins {
            sql.push(' ');
            sql.push_str(&join.to_sql());
        }

        let mut params = Vec::new();
        if let Some(predicate) = build_predicate(
            filter,
            self.descriptor.columns(),
            self.descriptor.entity(),
            self.dialect,
            1,
        )? {
            sql.push_str(" WHERE ");
            sql.push_str(&predicate.sql);
            params = predicate.params;
        }

        Ok(Statement { sql, params })
    }

    /// `SELECT 1 ... LIMIT 1` existence probe, cheaper than a count.
    pub fn exists(&self, filter: &Filter) -> Result<Statement, DataError> {
        let joins = resolve_joins(self.descriptor.joins(), filter);

        let mut sql = String::from("SELECT 1 FROM ");
        sql.push_str(self.descriptor.table());
        sql.push(' ');
        sql.push_str(self.descriptor.alias());
        for join in &joins {
            sql.push(' ');
            sql.push_str(&join.to_sql());
        }

        let mut params = Vec::new();
        if let Some(predicate) = build_predicate(
            filter,
            self.descriptor.columns(),
            self.descriptor.entity(),
            self.dialect,
            1,
        )? {
            sql.push_str(" WHERE ");
            sql.push_str(&predicate.sql);
            params = predicate.params;
        }
        sql.push_str(" LIMIT 1");

        Ok(Statement { sql, params })
    }

    /// INSERT over the declared write columns, values from the bind
    /// extractor. Identity is never written; the store generates it.
    pub fn insert(&self, entity: &T) -> Statement {
        let columns = self.descriptor.insert_columns();

        let mut sql = String::from("INSERT INTO ");
        sql.push_str(self.descriptor.table());
        sql.push_str(" (");
        sql.push_str(&columns.join(", "));
        sql.push_str(") VALUES (");
        for index in 1..=columns.len() {
            if index > 1 {
                sql.push_str(", ");
            }
            sql.push_str(&self.dialect.placeholder(index));
        }
        sql.push(')');

        Statement {
            sql,
            params: self.descriptor.bind_values(entity),
        }
    }

    /// Full-row UPDATE of the write columns, keyed by the caller's id.
    ///
    /// The id is taken as an argument rather than read from the entity so
    /// a caller can re-key a row in one statement.
    pub fn update(&self, entity: &T, id: i64) -> Statement {
        let columns = self.descriptor.insert_columns();

        let mut sql = String::from("UPDATE ");
        sql.push_str(self.descriptor.table());
        sql.push_str(" SET ");
        let mut index = 1;
        for column in columns {
            if index > 1 {
                sql.push_str(", ");
            }
            sql.push_str(column);
            sql.push_str(" = ");
            sql.push_str(&self.dialect.placeholder(index));
            index += 1;
        }
        sql.push_str(" WHERE ");
        sql.push_str(self.descriptor.id_column());
        sql.push_str(" = ");
        sql.push_str(&self.dialect.placeholder(index));

        let mut params = self.descriptor.bind_values(entity);
        params.push(FilterValue::Int(id));

        Statement { sql, params }
    }

    pub fn delete(&self, id: i64) -> Statement {
        let mut sql = String::from("DELETE FROM ");
        sql.push_str(self.descriptor.table());
        sql.push_str(" WHERE ");
        sql.push_str(self.descriptor.id_column());
        sql.push_str(" = ");
        sql.push_str(&self.dialect.placeholder(1));

        Statement {
            sql,
            params: vec![FilterValue::Int(id)],
        }
    }
}

/// Statement factory for a two-sided link table.
///
/// Pair reads are ordered by the selected side so listings are stable
/// across engines.
pub struct LinkStatements<'d> {
    descriptor: &'d LinkDescriptor,
    dialect: Dialect,
}

impl<'d> LinkStatements<'d> {
    pub fn new(descriptor: &'d LinkDescriptor, dialect: Dialect) -> Self {
        LinkStatements { descriptor, dialect }
    }

    fn pair_columns(&self) -> String {
        format!(
            "{}, {}",
            self.descriptor.left_column(),
            self.descriptor.right_column()
        )
    }

    pub fn insert(&self, left: i64, right: i64) -> Statement {
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}, {})",
            self.descriptor.table(),
            self.pair_columns(),
            self.dialect.placeholder(1),
            self.dialect.placeholder(2),
        );
        Statement {
            sql,
            params: vec![FilterValue::Int(left), FilterValue::Int(right)],
        }
    }

    pub fn delete(&self, left: i64, right: i64) -> Statement {
        let sql = format!(
            "DELETE FROM {} WHERE {} = {} AND {} = {}",
            self.descriptor.table(),
            self.descriptor.left_column(),
            self.dialect.placeholder(1),
            self.descriptor.right_column(),
            self.dialect.placeholder(2),
        );
        Statement {
            sql,
            params: vec![FilterValue::Int(left), FilterValue::Int(right)],
        }
    }

    pub fn delete_all_by_left(&self, left: i64) -> Statement {
        let sql = format!(
            "DELETE FROM {} WHERE {} = {}",
            self.descriptor.table(),
            self.descriptor.left_column(),
            self.dialect.placeholder(1),
        );
        Statement {
            sql,
            params: vec![FilterValue::Int(left)],
        }
    }

    pub fn delete_all_by_right(&self, right: i64) -> Statement {
        let sql = format!(
            "DELETE FROM {} WHERE {} = {}",
            self.descriptor.table(),
            self.descriptor.right_column(),
            self.dialect.placeholder(1),
        );
        Statement {
            sql,
            params: vec![FilterValue::Int(right)],
        }
    }

    pub fn exists(&self, left: i64, right: i64) -> Statement {
        let sql = format!(
            "SELECT 1 FROM {} WHERE {} = {} AND {} = {} LIMIT 1",
            self.descriptor.table(),
            self.descriptor.left_column(),
            self.dialect.placeholder(1),
            self.descriptor.right_column(),
            self.dialect.placeholder(2),
        );
        Statement {
            sql,
            params: vec![FilterValue::Int(left), FilterValue::Int(right)],
        }
    }

    pub fn select_all(&self) -> Statement {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY {}, {}",
            self.pair_columns(),
            self.descriptor.table(),
            self.descriptor.left_column(),
            self.descriptor.right_column(),
        );
        Statement {
            sql,
            params: Vec::new(),
        }
    }

    pub fn select_by_left(&self, left: i64) -> Statement {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = {} ORDER BY {}",
            self.pair_columns(),
            self.descriptor.table(),
            self.descriptor.left_column(),
            self.dialect.placeholder(1),
            self.descriptor.right_column(),
        );
        Statement {
            sql,
            params: vec![FilterValue::Int(left)],
        }
    }

    pub fn select_by_right(&self, right: i64) -> Statement {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = {} ORDER BY {}",
            self.pair_columns(),
            self.descriptor.table(),
            self.descriptor.right_column(),
            self.dialect.placeholder(1),
            self.descriptor.left_column(),
        );
        Statement {
            sql,
            params: vec![FilterValue::Int(right)],
        }
    }
}
