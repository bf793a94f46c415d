mod use_localstorage;
mod use_page_config;

pub use use_localstorage::use_localstorage;
pub use use_page_config::use_page_config;
