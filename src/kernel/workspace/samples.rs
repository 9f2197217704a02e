//! Seed workspaces shipped with the application.

use crate::kernel::editor::TabSnapshot;
use crate::models::{ContentMap, NodeId, TreeNode};

use super::{Workspace, WorkspaceId};

const CUSTOMER_ANALYSIS: &str =
    "SELECT * FROM customers\nWHERE created_at > '2024-01-01'\nORDER BY created_at DESC;";

const SALES_REPORT: &str = "SELECT \n  product_id,\n  SUM(quantity) as total_sold,\n  SUM(revenue) as total_revenue\nFROM sales\nGROUP BY product_id;";

const CREATE_TABLES: &str =
    "CREATE TABLE customers (\n  id INT PRIMARY KEY,\n  name VARCHAR(255),\n  email VARCHAR(255)\n);";

const README: &str = "# SQL Workspace\n\nWelcome to your SQL Workspace!\n\n## Features\n\n- Multi-tab SQL editor\n- Database explorer\n- AI-powered SQL assistant\n- Markdown documentation support\n\n## Getting Started\n\n1. Open a SQL file from the Explorer\n2. Write your query\n3. Click Run to execute\n4. View results in the Results panel\n\n## Documentation\n\nCheck out the other markdown files for more information about schemas and changes.";

const CHANGELOG: &str = "# Changelog\n\n## Version 1.0.0 (2024-01-15)\n\n### Added\n- Initial release\n- SQL editor with syntax highlighting\n- Database explorer\n- AI assistant integration\n- Markdown documentation support\n\n### Features\n- Multi-workspace support\n- Split view editing\n- Context menu operations\n- Real-time query execution";

const SCHEMA_DOC: &str = "# Database Schema Documentation\n\n## Tables\n\n### customers\n\n| Column | Type | Description |\n|--------|------|-------------|\n| id | INT | Primary key |\n| name | VARCHAR(255) | Customer name |\n| email | VARCHAR(255) | Customer email |\n| created_at | TIMESTAMP | Account creation date |\n\n### orders\n\n| Column | Type | Description |\n|--------|------|-------------|\n| id | INT | Primary key |\n| customer_id | INT | Foreign key to customers |\n| total | DECIMAL | Order total amount |\n| order_date | TIMESTAMP | Order date |\n\n## Relationships\n\n- `orders.customer_id` → `customers.id` (Many-to-One)";

const DB_CONFIG: &str = r#"{
  "host": "localhost",
  "port": 5432,
  "database": "production_db",
  "user": "admin",
  "ssl": true,
  "pool": {
    "min": 2,
    "max": 10
  }
}"#;

const APP_SETTINGS: &str = r#"{
  "appName": "SQL Workspace",
  "version": "1.0.0",
  "features": {
    "aiAssistant": true,
    "splitView": true,
    "darkMode": false
  },
  "editor": {
    "fontSize": 14,
    "tabSize": 2,
    "lineNumbers": true
  }
}"#;

const DATA_PROCESSOR: &str = r#""""
Data processing utilities for SQL Workspace.

This module provides functions for processing and transforming
database query results.
"""

import pandas as pd
from typing import List, Dict, Any


def process_query_results(results: List[Dict[str, Any]]) -> pd.DataFrame:
    """Convert query results to a pandas DataFrame."""
    df = pd.DataFrame(results)
    return df


def export_to_csv(df: pd.DataFrame, filename: str) -> None:
    """Export DataFrame to CSV file."""
    df.to_csv(filename, index=False)
    print(f"Data exported to {filename}")


if __name__ == "__main__":
    sample_data = [
        {"id": 1, "name": "Alice", "value": 100},
        {"id": 2, "name": "Bob", "value": 200},
    ]
    df = process_query_results(sample_data)
    print(df)
"#;

const DB_MIGRATION: &str = r#""""
Database migration script for SQL Workspace.

This script handles database schema migrations and data transformations.
"""

import psycopg2
from typing import Optional


class DatabaseMigration:
    """Handle database migrations."""

    def __init__(self, connection_string: str):
        self.connection_string = connection_string
        self.conn: Optional[psycopg2.extensions.connection] = None

    def connect(self) -> None:
        """Establish database connection."""
        self.conn = psycopg2.connect(self.connection_string)
        print("Connected to database")

    def execute_migration(self, sql: str) -> None:
        """Execute migration SQL."""
        if not self.conn:
            raise RuntimeError("Not connected to database")

        with self.conn.cursor() as cur:
            cur.execute(sql)
            self.conn.commit()
        print("Migration executed successfully")

    def close(self) -> None:
        """Close database connection."""
        if self.conn:
            self.conn.close()
            print("Connection closed")


if __name__ == "__main__":
    migration = DatabaseMigration("postgresql://localhost/mydb")
    migration.connect()
    migration.close()
"#;

const DEV_TEST_QUERY: &str = "-- Development test query\nSELECT * FROM test_table LIMIT 10;";
const MONTHLY_REPORT: &str = "-- Monthly sales report\nSELECT DATE_TRUNC('month', order_date) as month,\n  SUM(total) as revenue\nFROM orders\nGROUP BY month;";
const USER_METRICS: &str = "-- User engagement metrics\nSELECT user_id, COUNT(*) as actions\nFROM user_events\nGROUP BY user_id;";

fn tab(id: &str, title: &str, content: &str) -> TabSnapshot {
    TabSnapshot {
        node_id: NodeId::from(id),
        title: title.to_string(),
        content: content.to_string(),
        dirty: false,
    }
}

pub(super) fn sample_workspaces() -> Vec<Workspace> {
    vec![production(), development(), analytics()]
}

fn production() -> Workspace {
    Workspace {
        id: WorkspaceId::new("workspace-1"),
        name: "Production Queries".to_string(),
        file_tree: vec![
            TreeNode::folder(
                "queries",
                "queries",
                vec![
                    TreeNode::file("query1", "customer_analysis.sql"),
                    TreeNode::file("query2", "sales_report.sql"),
                ],
            ),
            TreeNode::folder(
                "schemas",
                "schemas",
                vec![TreeNode::file("schema1", "create_tables.sql")],
            ),
            TreeNode::folder(
                "docs",
                "documentation",
                vec![
                    TreeNode::file("readme", "README.md"),
                    TreeNode::file("changelog", "CHANGELOG.md"),
                    TreeNode::file("schema-doc", "schema-documentation.md"),
                ],
            ),
            TreeNode::folder(
                "config",
                "config",
                vec![
                    TreeNode::file("db-config", "database-config.json"),
                    TreeNode::file("app-settings", "app-settings.json"),
                ],
            ),
            TreeNode::folder(
                "scripts",
                "scripts",
                vec![
                    TreeNode::file("data-processor", "data_processor.py"),
                    TreeNode::file("db-migration", "db_migration.py"),
                ],
            ),
        ],
        open_tabs: vec![tab("query1", "customer_analysis.sql", CUSTOMER_ANALYSIS)],
        active_tab: Some(NodeId::from("query1")),
        file_content: ContentMap::from_iter([
            ("query1", CUSTOMER_ANALYSIS),
            ("query2", SALES_REPORT),
            ("schema1", CREATE_TABLES),
            ("readme", README),
            ("changelog", CHANGELOG),
            ("schema-doc", SCHEMA_DOC),
            ("db-config", DB_CONFIG),
            ("app-settings", APP_SETTINGS),
            ("data-processor", DATA_PROCESSOR),
            ("db-migration", DB_MIGRATION),
        ]),
    }
}

fn development() -> Workspace {
    Workspace {
        id: WorkspaceId::new("workspace-2"),
        name: "Development".to_string(),
        file_tree: vec![
            TreeNode::folder(
                "dev-queries",
                "dev-queries",
                vec![
                    TreeNode::file("dev1", "test_query.sql"),
                    TreeNode::file("dev2", "debug.sql"),
                ],
            ),
            TreeNode::file("scratch", "scratch.sql"),
        ],
        open_tabs: vec![tab("dev1", "test_query.sql", DEV_TEST_QUERY)],
        active_tab: Some(NodeId::from("dev1")),
        file_content: ContentMap::from_iter([
            ("dev1", DEV_TEST_QUERY),
            ("dev2", "-- Debug query\nEXPLAIN ANALYZE SELECT * FROM large_table;"),
            ("scratch", "-- Scratch space\n"),
        ]),
    }
}

fn analytics() -> Workspace {
    Workspace {
        id: WorkspaceId::new("workspace-3"),
        name: "Analytics".to_string(),
        file_tree: vec![TreeNode::folder(
            "reports",
            "reports",
            vec![
                TreeNode::file("report1", "monthly_report.sql"),
                TreeNode::file("report2", "user_metrics.sql"),
            ],
        )],
        open_tabs: Vec::new(),
        active_tab: None,
        file_content: ContentMap::from_iter([
            ("report1", MONTHLY_REPORT),
            ("report2", USER_METRICS),
        ]),
    }
}
