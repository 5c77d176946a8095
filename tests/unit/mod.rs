pub mod csv_typing;
pub mod series_properties;
