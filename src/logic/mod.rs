pub mod expand;
pub mod normalize;
pub mod references;

pub use expand::*;
pub use normalize::*;
pub use references::*;
