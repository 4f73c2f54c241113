pub mod models;
pub mod pool;
pub mod repository;

pub use pool::DatabaseError;
pub use repository::TaskRepository;
