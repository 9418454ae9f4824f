//! Shared status types for tootline.
//!
//! Leaf crate with **no internal tootline dependencies**. The client crate
//! builds its timeline buffer on top of these.
//!
//! |-----------------|-----------------------------------------------|
//! | Type            | Purpose                                       |
//! |-----------------|-----------------------------------------------|
//! | [`StatusId`]    | Server-assigned status identifier             |
//! | [`StatusEntry`] | One timeline item (possibly wrapping a reblog)|
//! | [`Account`]     | Author of a status                            |
//! |-----------------|-----------------------------------------------|

pub mod ids;
pub mod status;

pub use ids::StatusId;
pub use status::{Account, StatusEntry};
