pub mod attention;
pub mod contact;
pub mod io;
pub mod models;
