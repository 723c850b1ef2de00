// Authentication helpers: bearer tokens and password hashing

pub mod jwt;
pub mod password;
