//! HTML output for the fxsite generators.
//!
//! Pages are never parsed as a DOM. Generated content lives between literal
//! comment markers and everything outside those markers is left byte-for-byte
//! untouched.

pub mod error;
pub mod escape;
pub mod files;
pub mod sidecar;
pub mod skins;
pub mod splice;
pub mod stamp;

pub use error::RenderError;
pub use files::{read_page, update_page, write_page, write_page_if_absent};
pub use sidecar::RegionSidecar;
pub use skins::{all_skins, DailyBrief, DarkGradient, MinimalLight, PageTarget, Skin, WeeklyBrief};
pub use splice::{
    extract_keys, rebuild_keyed, replace_region, upsert_keyed, KeyPolicy, KeyedRegion,
    MarkerRegion, ITEM_INDENT,
};
pub use stamp::stamp_times;
