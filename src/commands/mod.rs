pub mod collect;
pub mod show;

pub use collect::handle_collect_command;
pub use show::handle_show_command;
