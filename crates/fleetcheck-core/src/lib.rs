pub mod color;
pub mod consts;
pub mod detection;
pub mod error;
pub mod filters;
pub mod frame;
pub mod inspection;
pub mod io;
pub mod pipeline;
