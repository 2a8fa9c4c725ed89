pub mod content_service;
pub mod progress_service;
pub mod retrieval_service;
pub mod workbench_service;

pub use content_service::*;
pub use progress_service::*;
pub use retrieval_service::*;
pub use workbench_service::*;
