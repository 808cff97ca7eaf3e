//! Relays uploaded images to Azure AI Vision and returns the generated caption.

pub mod analysis;
pub mod config;
pub mod docs;
pub mod error;
pub mod logging;
pub mod page;
pub mod routes;
pub mod upload;
pub mod vision;
