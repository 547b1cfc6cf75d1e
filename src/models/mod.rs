pub mod task;
pub mod view;

pub use task::*;
pub use view::*;
