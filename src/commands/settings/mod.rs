pub mod export;
pub mod get;
pub mod reset;
pub mod set;
pub mod show;

pub use export::export_command;
pub use get::get_command;
pub use reset::{reset_all_command, reset_command};
pub use set::set_command;
pub use show::show_command;
