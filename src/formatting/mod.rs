pub mod output;
pub mod utils;

pub use output::{print_outputs, render_outputs, OutputFormat};
pub use utils::{format_relative_time, format_value, truncate};
