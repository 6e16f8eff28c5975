pub mod checkup;
pub mod extract;
pub mod fixup;
pub mod helper;
pub mod init;
pub mod rewrite;
