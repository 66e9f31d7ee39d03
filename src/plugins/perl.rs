//! Perl scripts.

use serde_json::json;

use super::{author, date};
use crate::plugin::{CreateContext, CreatorPlugin};
use crate::signal::{Creation, PluginError};

const TEMPLATE: &str = "#!/usr/bin/perl

# ...{{ description }}
# {{ author }}{{ date }}

";

pub struct PerlPlugin;

impl CreatorPlugin for PerlPlugin {
    fn names(&self) -> &[&'static str] {
        &["perl", "pl"]
    }

    fn extensions(&self) -> &[&'static str] {
        &[".pl", ".perl"]
    }

    fn description(&self) -> &str {
        "Creates a very basic perl script.\nArguments are used as the description."
    }

    fn create(&self, ctx: &mut CreateContext<'_>) -> Result<Creation, PluginError> {
        let description = if ctx.args().is_empty() {
            String::new()
        } else {
            format!(" {}", ctx.args().join(" "))
        };
        let context = json!({
            "description": description,
            "author": author(ctx.config()),
            "date": date(),
        });
        Ok(Creation::Content(ctx.render(TEMPLATE, &context)?))
    }
}
