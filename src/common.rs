pub mod error;
pub mod extract;
pub mod slug;
pub mod url_utils;
