pub mod data_select_pagination;
pub mod data_select_sort_header;
