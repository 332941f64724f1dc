pub mod audit_writer;
pub mod session_writer;
