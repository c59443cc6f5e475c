pub mod assessment;
pub mod enums;
pub mod lab;
pub mod patient;

pub use assessment::*;
pub use enums::*;
pub use lab::*;
pub use patient::*;
