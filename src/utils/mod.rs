//! Utility modules shared by the SEO builders, the CLI and the server.

pub mod date;
pub mod hash;
pub mod html;
pub mod mime;
