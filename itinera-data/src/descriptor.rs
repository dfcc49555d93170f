use crate::join::JoinSpec;
use crate::value::FilterValue;

/// Identity sentinel carried by entities that were never saved.
///
/// `create` replaces it with the store's generated key via the descriptor's
/// id setter.
pub const UNSAVED_ID: i64 = -1;

/// Immutable table of logical filter keys to qualified column expressions.
///
/// One entry per logical key; every expression carries a table alias
/// (`l.country`, `tt.name`). Only keys present here may ever contribute to
/// generated SQL text — values are always bound as parameters, so the map
/// is the injection boundary.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    entries: Vec<(&'static str, &'static str)>,
}

impl ColumnMap {
    /// Resolve a logical key to its qualified column expression.
    pub fn resolve(&self, logical_key: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(key, _)| *key == logical_key)
            .map(|(_, column)| *column)
    }

    pub fn contains(&self, logical_key: &str) -> bool {
        self.resolve(logical_key).is_some()
    }

    fn push(&mut self, logical_key: &'static str, column: &'static str) {
        assert!(
            !self.contains(logical_key),
            "duplicate logical key '{logical_key}' in column map"
        );
        self.entries.push((logical_key, column));
    }
}

/// Everything the engine needs to know about one entity family.
///
/// A descriptor replaces per-entity driver subclasses: it carries the column
/// mapping table, the ordered join specification set, the write-side column
/// list, and plain `fn` accessors for identity and (optionally) name. One
/// immutable instance is built per family at startup and shared by every
/// repository that serves the family.
pub struct EntityDescriptor<T> {
    entity: &'static str,
    table: &'static str,
    alias: &'static str,
    id_column: &'static str,
    columns: ColumnMap,
    joins: Vec<JoinSpec>,
    insert_columns: &'static [&'static str],
    id: fn(&T) -> i64,
    set_id: fn(&mut T, i64),
    name: Option<fn(&T) -> &str>,
    bind: fn(&T) -> Vec<FilterValue>,
}

impl<T> EntityDescriptor<T> {
    /// Start building a descriptor for `table` aliased as `alias`.
    ///
    /// The table name doubles as the entity label used in error messages.
    pub fn builder(table: &'static str, alias: &'static str) -> EntityDescriptorBuilder<T> {
        EntityDescriptorBuilder {
            table,
            alias,
            id_column: "id",
            columns: ColumnMap::default(),
            joins: Vec::new(),
            insert_columns: &[],
            id: None,
            set_id: None,
            name: None,
            bind: None,
        }
    }

    /// Entity label for error messages (the table name).
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    pub fn alias(&self) -> &'static str {
        self.alias
    }

    /// Unqualified primary key column, used by write statements.
    pub fn id_column(&self) -> &'static str {
        self.id_column
    }

    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    pub fn joins(&self) -> &[JoinSpec] {
        &self.joins
    }

    /// Unqualified columns written by INSERT/UPDATE, in bind order.
    pub fn insert_columns(&self) -> &'static [&'static str] {
        self.insert_columns
    }

    pub fn id_of(&self, entity: &T) -> i64 {
        (self.id)(entity)
    }

    pub fn assign_id(&self, entity: &mut T, id: i64) {
        (self.set_id)(entity, id)
    }

    /// The entity's name, for families that declared a name accessor.
    pub fn name_of<'a>(&self, entity: &'a T) -> Option<&'a str> {
        self.name.map(|getter| getter(entity))
    }

    pub fn has_name_accessor(&self) -> bool {
        self.name.is_some()
    }

    /// Values for `insert_columns`, in the same order.
    pub fn bind_values(&self, entity: &T) -> Vec<FilterValue> {
        (self.bind)(entity)
    }
}

/// Builder for [`EntityDescriptor`]. Panics on construction mistakes —
/// descriptors are static startup data, so a bad declaration is a
/// programmer error, not a runtime condition.
pub struct EntityDescriptorBuilder<T> {
    table: &'static str,
    alias: &'static str,
    id_column: &'static str,
    columns: ColumnMap,
    joins: Vec<JoinSpec>,
    insert_columns: &'static [&'static str],
    id: Option<fn(&T) -> i64>,
    set_id: Option<fn(&mut T, i64)>,
    name: Option<fn(&T) -> &str>,
    bind: Option<fn(&T) -> Vec<FilterValue>>,
}

impl<T> EntityDescriptorBuilder<T> {
    /// Override the primary key column (default `id`).
    pub fn id_column(mut self, column: &'static str) -> Self {
        self.id_column = column;
        self
    }

    /// Map a logical filter key to a qualified column expression.
    pub fn column(mut self, logical_key: &'static str, qualified: &'static str) -> Self {
        self.columns.push(logical_key, qualified);
        self
    }

    /// Append a join spec. Declaration order is preserved end to end.
    pub fn join(mut self, spec: JoinSpec) -> Self {
        self.joins.push(spec);
        self
    }

    /// Columns written by INSERT and full-row UPDATE, in bind order.
    pub fn insert_columns(mut self, columns: &'static [&'static str]) -> Self {
        self.insert_columns = columns;
        self
    }

    /// Identity getter and setter.
    pub fn id_accessors(mut self, get: fn(&T) -> i64, set: fn(&mut T, i64)) -> Self {
        self.id = Some(get);
        self.set_id = Some(set);
        self
    }

    /// Name getter, for type families with uniqueness-by-name semantics.
    pub fn name_accessor(mut self, get: fn(&T) -> &str) -> Self {
        self.name = Some(get);
        self
    }

    /// Extractor producing the bind values for `insert_columns`.
    pub fn bind_with(mut self, bind: fn(&T) -> Vec<FilterValue>) -> Self {
        self.bind = Some(bind);
        self
    }

    /// Validate the declaration and freeze it.
    ///
    /// # Panics
    ///
    /// On invalid identifiers, duplicate aliases, a column expression whose
    /// alias is not declared, extra SELECT columns on a conditional join, or
    /// missing id accessors / bind extractor.
    pub fn build(self) -> EntityDescriptor<T> {
        assert!(is_valid_identifier(self.table), "invalid table name '{}'", self.table);
        assert!(is_valid_identifier(self.alias), "invalid base alias '{}'", self.alias);
        assert!(
            is_valid_identifier(self.id_column),
            "invalid id column '{}'",
            self.id_column
        );
        for column in self.insert_columns {
            assert!(is_valid_identifier(column), "invalid insert column '{column}'");
        }

        let mut aliases = vec![self.alias];
        for join in &self.joins {
            assert!(is_valid_identifier(join.table), "invalid join table '{}'", join.table);
            assert!(is_valid_identifier(join.alias), "invalid join alias '{}'", join.alias);
            assert!(
                !aliases.contains(&join.alias),
                "duplicate alias '{}' in join set for {}",
                join.alias,
                self.table
            );
            assert!(
                join.select.is_empty() || join.triggers.is_empty(),
                "join '{}' on {} declares SELECT columns but is conditional; \
                 mapper-visible joins must always be included",
                join.alias,
                self.table
            );
            aliases.push(join.alias);
        }

        for (key, qualified) in &self.columns.entries {
            let (prefix, column) = qualified
                .split_once('.')
                .unwrap_or_else(|| panic!("column for '{key}' must be alias-qualified, got '{qualified}'"));
            assert!(
                aliases.contains(&prefix),
                "column for '{key}' uses undeclared alias '{prefix}'"
            );
            assert!(
                is_valid_identifier(column),
                "invalid column in mapping for '{key}': '{qualified}'"
            );
        }

        let id = self.id.expect("descriptor requires id accessors");
        let set_id = self.set_id.expect("descriptor requires id accessors");
        let bind = self.bind.expect("descriptor requires a bind extractor");

        EntityDescriptor {
            entity: self.table,
            table: self.table,
            alias: self.alias,
            id_column: self.id_column,
            columns: self.columns,
            joins: self.joins,
            insert_columns: self.insert_columns,
            id,
            set_id,
            name: self.name,
            bind,
        }
    }
}

/// Descriptor for a two-sided link table (no surrogate identity).
///
/// Both columns follow the `<entity>_id` convention of the storage schema.
#[derive(Debug, Clone)]
pub struct LinkDescriptor {
    table: &'static str,
    left_column: &'static str,
    right_column: &'static str,
}

impl LinkDescriptor {
    /// # Panics
    ///
    /// On invalid identifiers or identical side columns.
    pub fn new(table: &'static str, left_column: &'static str, right_column: &'static str) -> Self {
        assert!(is_valid_identifier(table), "invalid link table name '{table}'");
        assert!(is_valid_identifier(left_column), "invalid link column '{left_column}'");
        assert!(is_valid_identifier(right_column), "invalid link column '{right_column}'");
        assert!(
            left_column != right_column,
            "link table '{table}' must use distinct side columns"
        );
        LinkDescriptor {
            table,
            left_column,
            right_column,
        }
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    pub fn left_column(&self) -> &'static str {
        self.left_column
    }

    pub fn right_column(&self) -> &'static str {
        self.right_column
    }
}

/// Conservative identifier check: ASCII letter or underscore first, then
/// letters, digits, underscores. Anything else is rejected at construction.
fn is_valid_identifier(ident: &str) -> bool {
    let mut chars = ident.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::join::JoinSpec;

    struct Item {
        id: i64,
        name: String,
    }

    fn descriptor() -> EntityDescriptor<Item> {
        EntityDescriptor::builder("items", "i")
            .column("id", "i.id")
            .column("name", "i.name")
            .insert_columns(&["name"])
            .id_accessors(|e: &Item| e.id, |e, id| e.id = id)
            .name_accessor(|e| e.name.as_str())
            .bind_with(|e| vec![e.name.clone().into()])
            .build()
    }

    #[test]
    fn resolves_mapped_keys_and_rejects_others() {
        let desc = descriptor();
        assert_eq!(desc.columns().resolve("name"), Some("i.name"));
        assert_eq!(desc.columns().resolve("bogus"), None);
    }

    #[test]
    fn accessors_round_trip() {
        let desc = descriptor();
        let mut item = Item {
            id: UNSAVED_ID,
            name: "Ferry".into(),
        };
        assert_eq!(desc.id_of(&item), UNSAVED_ID);
        desc.assign_id(&mut item, 7);
        assert_eq!(desc.id_of(&item), 7);
        assert_eq!(desc.name_of(&item), Some("Ferry"));
        assert_eq!(desc.bind_values(&item), vec!["Ferry".into()]);
    }

    #[test]
    #[should_panic(expected = "duplicate logical key")]
    fn duplicate_logical_key_panics() {
        EntityDescriptor::<Item>::builder("items", "i")
            .column("name", "i.name")
            .column("name", "i.other");
    }

    #[test]
    #[should_panic(expected = "duplicate alias")]
    fn duplicate_alias_panics() {
        EntityDescriptor::<Item>::builder("items", "i")
            .join(JoinSpec::inner("kinds", "i", "i.id = i.kind_id"))
            .id_accessors(|e: &Item| e.id, |e, id| e.id = id)
            .bind_with(|_| Vec::new())
            .build();
    }

    #[test]
    #[should_panic(expected = "undeclared alias")]
    fn unqualified_alias_panics() {
        EntityDescriptor::<Item>::builder("items", "i")
            .column("kind", "k.name")
            .id_accessors(|e: &Item| e.id, |e, id| e.id = id)
            .bind_with(|_| Vec::new())
            .build();
    }

    #[test]
    #[should_panic(expected = "conditional")]
    fn select_on_conditional_join_panics() {
        EntityDescriptor::<Item>::builder("items", "i")
            .join(
                JoinSpec::inner("kinds", "k", "k.id = i.kind_id")
                    .triggered_by(&["kind"])
                    .selecting(&["k.name AS kind_name"]),
            )
            .id_accessors(|e: &Item| e.id, |e, id| e.id = id)
            .bind_with(|_| Vec::new())
            .build();
    }

    #[test]
    fn link_descriptor_exposes_sides() {
        let link = LinkDescriptor::new("tour_locations", "tour_id", "location_id");
        assert_eq!(link.table(), "tour_locations");
        assert_eq!(link.left_column(), "tour_id");
        assert_eq!(link.right_column(), "location_id");
    }
}
