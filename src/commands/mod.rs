pub mod init;
pub mod install;
pub mod mkclass;
