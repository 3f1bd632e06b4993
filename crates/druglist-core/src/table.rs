//! Table layout descriptor served at `/api/table-config`.
//!
//! Describes the columns of the drug listing and its paging defaults so
//! clients can lay out headers without hardcoding them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub label: String,
    pub sortable: bool,
    /// Preferred width in pixels; terminal clients scale it down.
    pub width: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSettings {
    pub page_size: u32,
    pub max_page_size: u32,
    pub sort_by: String,
    pub sort_order: String,
    pub pagination: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    pub columns: Vec<Column>,
    pub settings: TableSettings,
}

impl Default for TableConfig {
    fn default() -> Self {
        let column = |id: &str, label: &str, sortable: bool, width: u16| Column {
            id: id.to_string(),
            label: label.to_string(),
            sortable,
            width,
        };
        Self {
            columns: vec![
                column("id", "Id", false, 80),
                column("code", "Code", true, 120),
                column("name", "Name", true, 250),
                column("company", "Company", true, 200),
                column("launchDate", "Launch Date", true, 150),
            ],
            settings: TableSettings {
                page_size: 10,
                max_page_size: crate::store::MAX_PAGE_SIZE,
                sort_by: "launchDate".to_string(),
                sort_order: "desc".to_string(),
                pagination: true,
            },
        }
    }
}
