pub mod dto;
pub mod forms;
pub mod ports;
pub mod use_cases;
