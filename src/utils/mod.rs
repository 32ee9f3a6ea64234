// Display formatting
pub mod file_size;
pub mod os_icon;
pub mod timestamp;

// Form input and URLs
pub mod form_value;
pub mod host;

pub use file_size::format_file_size;
pub use os_icon::get_os_icon;
pub use timestamp::format_timestamp;
pub use form_value::{parse_flag, parse_number};
pub use host::hostname_from_url;
