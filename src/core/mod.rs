pub mod backup;
pub mod import;
pub mod ledger;
pub mod log;
pub mod register;
pub mod registry;
pub mod scanner;
pub mod session;
