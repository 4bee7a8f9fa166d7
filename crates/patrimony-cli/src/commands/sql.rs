use anyhow::Result;
use clap::ValueEnum;
use patrimony_query::sql::schema_statements;
use patrimony_query::DatabaseBackend;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    #[default]
    Postgres,
    Mysql,
    Sqlite,
}

impl From<Backend> for DatabaseBackend {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::Postgres => DatabaseBackend::Postgres,
            Backend::Mysql => DatabaseBackend::MySql,
            Backend::Sqlite => DatabaseBackend::Sqlite,
        }
    }
}

/// Print the DDL for the inventory tables, one statement per line.
pub fn cmd_sql(backend: Backend) -> Result<()> {
    for statement in schema_statements() {
        println!("{};", statement.build(backend.into()));
    }
    Ok(())
}
