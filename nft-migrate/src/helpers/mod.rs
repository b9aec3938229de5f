pub mod abi;
pub mod address;
pub mod app_config;
pub mod greenfield_config;
