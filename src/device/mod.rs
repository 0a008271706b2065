pub mod tl500;

pub use tl500::{Tl500, FRAME_LEN};
