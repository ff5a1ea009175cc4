pub mod column_select;
pub mod export_button;
pub mod header;
pub mod results_summary;
pub mod results_table;
pub mod upload_form;
