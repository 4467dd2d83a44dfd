pub mod data_select;
