//! Bats test files (bash automated testing).

use serde_json::json;

use super::{author, date};
use crate::plugin::{CreateContext, CreatorPlugin};
use crate::signal::{Creation, PluginError};

const TEMPLATE: &str = "#!/usr/bin/env bats

# {{ name }}
# ...
# {{ author }}{{ date }}
{% if setup %}
setup() {
    # Setup for each test.

}
{% endif %}
@test \"...\" {
    x=\"\"
    [ -z \"$x\" ]
}
{% if teardown %}
teardown() {
    # Teardown for each test.

}
{% endif %}";

pub struct BatsPlugin;

impl CreatorPlugin for BatsPlugin {
    fn names(&self) -> &[&'static str] {
        &["bats"]
    }

    fn extensions(&self) -> &[&'static str] {
        &[".bats"]
    }

    fn description(&self) -> &str {
        "Creates a Bats test file."
    }

    fn usage(&self) -> Option<&str> {
        Some(
            "Usage:
    bats [s] [t]

Options:
    s,setup     : Include setup() function.
    t,teardown  : Include teardown() function.",
        )
    }

    fn create(&self, ctx: &mut CreateContext<'_>) -> Result<Creation, PluginError> {
        let context = json!({
            "name": ctx.stem(),
            "author": author(ctx.config()),
            "date": date(),
            "setup": ctx.has_arg("^s(etup)?$"),
            "teardown": ctx.has_arg("^t(eardown)?$"),
        });
        Ok(Creation::Content(ctx.render(TEMPLATE, &context)?))
    }
}
