pub mod auth;
pub mod check;
pub mod run;
