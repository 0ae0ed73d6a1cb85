pub mod message_area;
pub mod metadata_table;
pub mod upload_form;
