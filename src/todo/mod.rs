pub mod data;
pub mod endpoints;
pub mod util;
