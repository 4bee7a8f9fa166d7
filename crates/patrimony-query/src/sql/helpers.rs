use sea_query::{
    Alias, Expr, Func, LikeExpr, MysqlQueryBuilder, PostgresQueryBuilder,
    QueryStatementWriter, SchemaStatementBuilder, SimpleExpr, SqliteQueryBuilder,
};

use super::types::DatabaseBackend;

/// Convert a schema statement to SQL for a specific backend
pub fn build_schema_statement<T: SchemaStatementBuilder>(
    stmt: &T,
    backend: DatabaseBackend,
) -> String {
    match backend {
        DatabaseBackend::Postgres => stmt.to_string(PostgresQueryBuilder),
        DatabaseBackend::MySql => stmt.to_string(MysqlQueryBuilder),
        DatabaseBackend::Sqlite => stmt.to_string(SqliteQueryBuilder),
    }
}

/// Convert a query statement to SQL for a specific backend, values inlined
pub fn build_query_statement<T: QueryStatementWriter>(
    stmt: &T,
    backend: DatabaseBackend,
) -> String {
    match backend {
        DatabaseBackend::Postgres => stmt.to_string(PostgresQueryBuilder),
        DatabaseBackend::MySql => stmt.to_string(MysqlQueryBuilder),
        DatabaseBackend::Sqlite => stmt.to_string(SqliteQueryBuilder),
    }
}

pub(crate) fn col(name: &str) -> Expr {
    Expr::col(Alias::new(name))
}

/// Escape `%`, `_` and the escape character itself for a LIKE pattern.
pub(crate) fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// `LOWER(column) LIKE '%needle%' ESCAPE '\'`; `needle` must be lowercase.
pub(crate) fn lower_contains(column: &str, needle: &str) -> SimpleExpr {
    Expr::expr(Func::lower(col(column)))
        .like(LikeExpr::new(format!("%{}%", escape_like(needle))).escape('\\'))
}

/// `LOWER(column)`, for case-insensitive ordering.
pub(crate) fn lower(column: &str) -> SimpleExpr {
    Func::lower(col(column)).into()
}
