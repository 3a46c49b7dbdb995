pub mod backup;
pub mod config;
pub mod db;
pub mod export;
pub mod init;
pub mod log;
pub mod qr;
pub mod records;
pub mod register;
pub mod scan;
pub mod students;
