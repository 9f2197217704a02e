//! Mock database catalog and CREATE TABLE rendering for schema import.

use serde::Serialize;

use crate::kernel::editor::PaneId;
use crate::models::{FileKind, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSchema {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub data_type: &'static str,
    pub nullable: bool,
    pub primary_key: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [ColumnSchema],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatabaseSchema {
    pub name: &'static str,
    pub tables: &'static [TableSchema],
}

const fn col(name: &'static str, data_type: &'static str, nullable: bool) -> ColumnSchema {
    ColumnSchema {
        name,
        data_type,
        nullable,
        primary_key: false,
    }
}

const fn pk(name: &'static str, data_type: &'static str) -> ColumnSchema {
    ColumnSchema {
        name,
        data_type,
        nullable: false,
        primary_key: true,
    }
}

const CATALOG: &[DatabaseSchema] = &[
    DatabaseSchema {
        name: "production",
        tables: &[
            TableSchema {
                name: "customers",
                columns: &[
                    pk("id", "INTEGER"),
                    col("name", "VARCHAR(255)", false),
                    col("email", "VARCHAR(255)", false),
                    col("created_at", "TIMESTAMP", false),
                    col("updated_at", "TIMESTAMP", true),
                ],
            },
            TableSchema {
                name: "orders",
                columns: &[
                    pk("id", "INTEGER"),
                    col("customer_id", "INTEGER", false),
                    col("total_amount", "DECIMAL(10,2)", false),
                    col("status", "VARCHAR(50)", false),
                    col("created_at", "TIMESTAMP", false),
                ],
            },
            TableSchema {
                name: "products",
                columns: &[
                    pk("id", "INTEGER"),
                    col("name", "VARCHAR(255)", false),
                    col("price", "DECIMAL(10,2)", false),
                    col("stock", "INTEGER", false),
                ],
            },
        ],
    },
    DatabaseSchema {
        name: "staging",
        tables: &[TableSchema {
            name: "test_users",
            columns: &[
                pk("id", "INTEGER"),
                col("username", "VARCHAR(100)", false),
                col("email", "VARCHAR(255)", false),
            ],
        }],
    },
    DatabaseSchema {
        name: "development",
        tables: &[TableSchema {
            name: "dev_logs",
            columns: &[
                pk("id", "INTEGER"),
                col("message", "TEXT", false),
                col("level", "VARCHAR(20)", false),
                col("timestamp", "TIMESTAMP", false),
            ],
        }],
    },
];

pub fn catalog() -> &'static [DatabaseSchema] {
    CATALOG
}

pub fn find_table(database: &str, table: &str) -> Option<&'static TableSchema> {
    CATALOG
        .iter()
        .find(|db| db.name == database)?
        .tables
        .iter()
        .find(|t| t.name == table)
}

pub fn create_table_sql(table: &TableSchema) -> String {
    let columns: Vec<String> = table
        .columns
        .iter()
        .map(|column| {
            let mut line = format!("  {} {}", column.name, column.data_type);
            if column.primary_key {
                line.push_str(" PRIMARY KEY");
            }
            if !column.nullable {
                line.push_str(" NOT NULL");
            }
            line
        })
        .collect();
    format!("CREATE TABLE {} (\n{}\n);", table.name, columns.join(",\n"))
}

/// Where an imported schema lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportPlan {
    ReplaceActive,
    CreateFile,
    Confirm,
}

/// `active_content` is the content of the active tab, if one is open. Blank
/// content and the untouched SQL template are replaced without asking.
pub fn plan_import(active_content: Option<&str>) -> ImportPlan {
    match active_content {
        None => ImportPlan::CreateFile,
        Some(content)
            if content.trim().is_empty() || content == FileKind::Sql.default_template() =>
        {
            ImportPlan::ReplaceActive
        }
        Some(_) => ImportPlan::Confirm,
    }
}

pub fn schema_file_name(table: &str) -> String {
    format!("{}_schema.sql", table)
}

/// An import waiting for the user to confirm replacing existing content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingImport {
    pub table: String,
    pub sql: String,
    pub pane: PaneId,
    pub node_id: NodeId,
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/schema.rs"]
mod tests;
