mod download_selected;
mod language_selected;
mod link_received;
mod start;

pub use download_selected::download_selected;
pub use language_selected::language_selected;
pub use link_received::link_received;
pub use start::start;
