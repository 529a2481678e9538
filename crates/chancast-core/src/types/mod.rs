//! Domain types for the ChannelCast distribution core.

pub mod message;
pub mod privilege;
pub mod scheduled;
pub mod stats;

pub use message::ChannelMessage;
pub use privilege::{Privilege, PrivilegeSet};
pub use scheduled::PendingScheduled;
pub use stats::{ConnectionSample, PeakRecord};
