//! `restock-catalog` — catalog domain types.
//!
//! Products come from two origins: locally managed records and mirrors of a
//! third-party product feed. This crate defines both shapes plus the merged
//! projection served to callers.

pub mod external;
pub mod product;
pub mod view;

pub use external::{
    DEFAULT_MIRROR_THRESHOLD, ExternalProduct, Rating, mirror_code, mirror_external_id,
};
pub use product::{NewProduct, Product};
pub use view::ProductView;
