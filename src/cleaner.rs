//! Folder removal used by the disposition loop

mod path_precheck;
mod single_deletion;

pub use single_deletion::{delete_folder, DeleteOutcome};
