pub mod board;
pub mod id;
pub mod task;

pub use board::{Board, Column};
pub use id::{ColumnId, IdGenerator, TaskId};
pub use task::{Priority, Task};
