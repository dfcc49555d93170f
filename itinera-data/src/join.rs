use crate::filter::Filter;

/// Join flavor. Only the two kinds the engine's descriptors need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
}

impl JoinKind {
    pub fn as_sql(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
        }
    }
}

/// One optional join in an entity's join specification set.
///
/// The trigger set is an explicit named field: a join is included in a
/// composed statement when `triggers` is empty (always include) or when it
/// intersects the filter's key set. Declaration order in the descriptor is
/// authoritative — a link table must be declared before the table it links
/// to, and the resolver never reorders.
///
/// `select` lists extra columns this join contributes to the SELECT list
/// (e.g. `"lt.name AS location_type_name"`). Because the SELECT list must
/// not vary between calls, `select` is only allowed on always-include joins;
/// the descriptor builder enforces this.
///
/// `fan_out` marks joins that can multiply base rows (link tables). When any
/// resolved join fans out, the composer emits `SELECT DISTINCT` so a filter
/// matching several linked rows does not duplicate the base entity.
#[derive(Debug, Clone)]
pub struct JoinSpec {
    pub kind: JoinKind,
    pub table: &'static str,
    pub alias: &'static str,
    pub on: &'static str,
    pub triggers: &'static [&'static str],
    pub select: &'static [&'static str],
    pub fan_out: bool,
}

impl JoinSpec {
    pub fn inner(table: &'static str, alias: &'static str, on: &'static str) -> Self {
        JoinSpec {
            kind: JoinKind::Inner,
            table,
            alias,
            on,
            triggers: &[],
            select: &[],
            fan_out: false,
        }
    }

    pub fn left(table: &'static str, alias: &'static str, on: &'static str) -> Self {
        JoinSpec {
            kind: JoinKind::Left,
            table,
            alias,
            on,
            triggers: &[],
            select: &[],
            fan_out: false,
        }
    }

    /// Restrict this join to filters that contain at least one of `keys`.
    pub fn triggered_by(mut self, keys: &'static [&'static str]) -> Self {
        self.triggers = keys;
        self
    }

    /// Extra SELECT-list columns contributed by this join.
    pub fn selecting(mut self, columns: &'static [&'static str]) -> Self {
        self.select = columns;
        self
    }

    /// Mark this join as row-multiplying (forces `SELECT DISTINCT`).
    pub fn fans_out(mut self) -> Self {
        self.fan_out = true;
        self
    }

    /// The join clause fragment, e.g. `LEFT JOIN location_types lt ON ...`.
    pub fn to_sql(&self) -> String {
        format!("{} {} {} ON {}", self.kind.as_sql(), self.table, self.alias, self.on)
    }

    fn is_triggered_by(&self, filter: &Filter) -> bool {
        self.triggers.is_empty() || self.triggers.iter().any(|key| filter.contains_key(key))
    }
}

/// Select the joins a filter needs, preserving declaration order.
///
/// A spec is included when its trigger set is empty or intersects the
/// filter's keys. The result is minimal: a join that nothing requested is
/// absent from the composed statement.
pub fn resolve_joins<'a>(joins: &'a [JoinSpec], filter: &Filter) -> Vec<&'a JoinSpec> {
    resolve_joins_ordered(joins, filter, None)
}

/// [`resolve_joins`] with an ORDER BY key counted as requested.
///
/// Sorting by a column behind a conditional join must bring that join
/// along, or the statement would reference an alias its FROM clause never
/// introduces.
pub fn resolve_joins_ordered<'a>(
    joins: &'a [JoinSpec],
    filter: &Filter,
    order_key: Option<&str>,
) -> Vec<&'a JoinSpec> {
    joins
        .iter()
        .filter(|spec| {
            spec.is_triggered_by(filter)
                || order_key.is_some_and(|key| spec.triggers.iter().any(|t| *t == key))
        })
        .collect()
}
