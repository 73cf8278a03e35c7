pub mod opsdb;
