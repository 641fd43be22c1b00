pub mod cmd;
pub mod luks;
pub mod lvm;
pub mod mkfs;
pub mod mount;
