pub mod counts;
pub mod detail;
pub mod intake;

pub use counts::{CountsAction, CountsPage};
pub use detail::{DetailAction, DetailPage};
pub use intake::{IntakeEvent, IntakePage};
