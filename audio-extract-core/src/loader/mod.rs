pub mod media_loader;
pub mod sniff;
