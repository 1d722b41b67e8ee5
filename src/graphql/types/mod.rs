pub mod category;
pub mod inputs;
pub mod recipe;
pub mod user;

pub use category::*;
pub use inputs::*;
pub use recipe::*;
pub use user::*;
