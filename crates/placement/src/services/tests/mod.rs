mod auth;
mod common;
mod student;
