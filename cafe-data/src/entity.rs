/// A database entity: table name, id column and column list.
///
/// # Example
///
/// ```ignore
/// impl Entity for Cafe {
///     type Id = i64;
///     fn table_name() -> &'static str { "cafe" }
///     fn id_column() -> &'static str { "id" }
///     fn columns() -> &'static [&'static str] { &["id", "name", "seats"] }
///     fn id(&self) -> &i64 { &self.id }
/// }
/// ```
pub trait Entity: Send + Sync + Unpin + 'static {
    type Id: Send + Sync + ToString + 'static;

    fn table_name() -> &'static str;
    fn id_column() -> &'static str;
    fn columns() -> &'static [&'static str];
    fn id(&self) -> &Self::Id;

    /// Comma-separated column list for `SELECT` / `RETURNING` clauses.
    fn column_list() -> String {
        Self::columns().join(", ")
    }

    /// Columns other than the id, in declaration order.
    fn data_columns() -> Vec<&'static str> {
        Self::columns()
            .iter()
            .copied()
            .filter(|c| *c != Self::id_column())
            .collect()
    }
}
