//! Plain text files.

use crate::plugin::{CreateContext, CreatorPlugin};
use crate::signal::{Creation, PluginError};

pub struct TextPlugin;

impl CreatorPlugin for TextPlugin {
    fn names(&self) -> &[&'static str] {
        &["text", "txt", "blank"]
    }

    fn extensions(&self) -> &[&'static str] {
        &[".txt"]
    }

    fn description(&self) -> &str {
        "Creates a blank text file (no content)."
    }

    fn ignore_post(&self) -> &[&'static str] {
        &["chmodx"]
    }

    fn allow_blank(&self) -> bool {
        true
    }

    fn create(&self, _ctx: &mut CreateContext<'_>) -> Result<Creation, PluginError> {
        Ok(Creation::Content(String::new()))
    }
}
