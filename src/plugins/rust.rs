//! Rust source files.

use crate::plugin::{CreateContext, CreatorPlugin};
use crate::signal::{Creation, PluginError};

const TEMPLATE: &str = "use std::io;

fn main() {

}
";

pub struct RustPlugin;

impl CreatorPlugin for RustPlugin {
    fn names(&self) -> &[&'static str] {
        &["rust", "rs"]
    }

    fn extensions(&self) -> &[&'static str] {
        &[".rs"]
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn description(&self) -> &str {
        "Creates a blank Rust file."
    }

    fn ignore_post(&self) -> &[&'static str] {
        &["chmodx"]
    }

    fn create(&self, _ctx: &mut CreateContext<'_>) -> Result<Creation, PluginError> {
        Ok(Creation::Content(TEMPLATE.to_string()))
    }
}
