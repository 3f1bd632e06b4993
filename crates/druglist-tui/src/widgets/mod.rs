//! Ratatui widgets for the druglist TUI.

pub mod command_bar;
pub mod company_list;
pub mod drug_table;
pub mod footer;
pub mod header;
pub mod help;
