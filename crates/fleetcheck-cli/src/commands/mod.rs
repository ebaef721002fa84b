pub mod compare;
pub mod config;
pub mod history;
pub mod info;
pub mod inspect;
pub mod inspect_video;
pub mod scan;
