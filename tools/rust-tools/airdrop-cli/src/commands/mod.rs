mod command;

pub mod build_tree;
pub mod proof;
pub mod verify;

pub use command::Command;
