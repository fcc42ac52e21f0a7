//! Cursor-backed scan of a foreign relation.
//!
//! A scan runs the plan's remote query through a named cursor on the
//! data-access bridge and returns one row per iteration. Between callbacks the
//! scan holds only the cursor's name; every callback reopens a scoped session,
//! looks the cursor up again and copies what it needs out before the session
//! ends.
//!
//! ```text
//! Unopened --begin--> Open --iterate--> Open | Exhausted
//!                       |                        |
//!                       +------ rescan ----------+--> Open (fresh cursor)
//!                       +------ end -------------+--> Closed
//! ```

mod flags;
mod slot;
mod state;

pub use flags::ExecFlags;
pub use slot::TupleSlot;
pub use state::ScanState;
