//! Entity generators for test data.
//!
//! - [`SwimmerGenerator`]: roster swimmers with ages relative to a meet date
//! - [`ClubGenerator`]: host clubs with addresses and abbreviations
//! - [`MeetGenerator`]: meets over the [`standard_events`] catalog
//! - [`EntryGenerator`]: individual selections with seed times, and relay teams

pub mod club;
pub mod entry;
pub mod meet;
pub mod swimmer;

pub use club::{ClubGenerator, abbreviate};
pub use entry::{EntryGenConfig, EntryGenerator, format_seed_time};
pub use meet::{MeetGenConfig, MeetGenerator, standard_events};
pub use swimmer::{SwimmerGenConfig, SwimmerGenerator};
