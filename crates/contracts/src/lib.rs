pub mod shared;
pub mod workloads;
