//! Run driver: wires payloads, the client, the scheduler, the aggregate and the
//! reporter together for one load run.
mod phase;
mod run;


pub use phase::RunPhase;
pub use run::{RunReport, run_load};
