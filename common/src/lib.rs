pub mod prelude;
pub mod vfile;
pub mod vpath;
