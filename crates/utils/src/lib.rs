pub mod duration;
pub mod media_types;
mod path;

pub use media_types::{ExtensionError, VideoExtensions};
pub use path::{create_log_path, log_path_in, display_name, rebase};
