pub mod exec_credential;
