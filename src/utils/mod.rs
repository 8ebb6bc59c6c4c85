pub mod headers;
pub mod ip;
