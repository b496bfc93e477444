pub mod memory_distributor;
