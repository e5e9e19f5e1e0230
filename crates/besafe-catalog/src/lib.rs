pub mod db;
pub mod gallery;
