pub mod builder;
pub mod ir;
pub mod servicefile;

pub use builder::ServiceGraphBuilder;
pub use servicefile::ServiceFile;
