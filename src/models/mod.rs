pub mod access_record;
pub mod access_result;
pub mod list_range;
