pub mod claim;

pub use claim::{format_timestamp, Claim, ClaimListEntry, ClaimStatus, NewClaim};
