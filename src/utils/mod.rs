pub mod alerts;
pub mod similarity;
pub mod text;

pub use alerts::*;
pub use similarity::*;
pub use text::*;
