//! DNS failover subsystem.
//!
//! # Data Flow
//! ```text
//! FailoverConfig
//!     → types.rs (FailoverRecordSet: PRIMARY + SECONDARY entries)
//!     → switch.rs (one UPSERT change batch for both entries)
//!     → client.rs (DnsControlPlane: HTTP control plane)
//!       or memory.rs (in-process zone for dry runs)
//! ```
//!
//! # Design Decisions
//! - Writes are idempotent upserts, never read-then-diff
//! - A change batch is all-or-nothing at the control plane boundary
//! - Entries are never deleted by the controller

pub mod client;
pub mod memory;
pub mod switch;
pub mod types;

pub use client::{DnsControlPlane, HttpDnsClient};
pub use memory::MemoryZone;
pub use switch::FailoverSwitch;
pub use types::{ChangeBatch, ChangeInfo, DnsError, DnsResult, FailoverRecordSet, RecordType};
