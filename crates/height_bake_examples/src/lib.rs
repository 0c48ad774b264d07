#![forbid(unsafe_code)]

mod rendering;
mod terrains;

pub use rendering::{init_tracing, render_cache_to_png, RenderConfig};
pub use terrains::{rolling_hills, Hill, HillField};
