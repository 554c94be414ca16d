pub mod config;
pub mod logger;
pub mod export_tree;
pub mod model;
pub mod extract;
pub mod merge;
pub mod slug;
pub mod render;
pub mod sink;
pub mod pipeline;
mod text_utils;
mod test_data;
