pub mod content;
pub mod corpus;
pub mod workbench;

pub use content::*;
pub use corpus::*;
pub use workbench::*;
