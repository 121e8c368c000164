// Components module - UI building blocks of the main screen
//
// - Title bar: data source name and lookup indicator
// - Mappings panel: committed mapping list
// - Logs panel: recent tracing output
// - Status bar: key hints and counts
// - Toast: transient notifications

pub mod logs_panel;
pub mod mappings_panel;
pub mod status_bar;
pub mod title_bar;
pub mod toast;

pub use toast::Toast;
