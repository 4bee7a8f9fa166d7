use sea_query::{IndexCreateStatement, SelectStatement, TableCreateStatement};

use super::helpers::{build_query_statement, build_schema_statement};

/// Database backend for SQL generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DatabaseBackend {
    #[default]
    Postgres,
    MySql,
    Sqlite,
}

/// A statement that renders to SQL for any backend
#[derive(Debug, Clone)]
pub enum BuiltQuery {
    Select(Box<SelectStatement>),
    CreateTable(Box<TableCreateStatement>),
    CreateIndex(Box<IndexCreateStatement>),
}

impl BuiltQuery {
    /// Build SQL string for the specified database backend
    pub fn build(&self, backend: DatabaseBackend) -> String {
        match self {
            BuiltQuery::Select(stmt) => build_query_statement(stmt.as_ref(), backend),
            BuiltQuery::CreateTable(stmt) => build_schema_statement(stmt.as_ref(), backend),
            BuiltQuery::CreateIndex(stmt) => build_schema_statement(stmt.as_ref(), backend),
        }
    }
}
