//! PHP scripts.

use serde_json::json;

use super::{author, date};
use crate::plugin::{CreateContext, CreatorPlugin};
use crate::signal::{Creation, PluginError};

const TEMPLATE: &str = "#!/usr/bin/env php
<?php

/*  {{ name }}
    ...
    {{ author }}{{ date }}
*/


";

pub struct PhpPlugin;

impl CreatorPlugin for PhpPlugin {
    fn names(&self) -> &[&'static str] {
        &["php"]
    }

    fn extensions(&self) -> &[&'static str] {
        &[".php"]
    }

    fn description(&self) -> &str {
        "Creates an executable php script."
    }

    fn create(&self, ctx: &mut CreateContext<'_>) -> Result<Creation, PluginError> {
        let context = json!({
            "name": ctx.basename(),
            "author": author(ctx.config()),
            "date": date(),
        });
        Ok(Creation::Content(ctx.render(TEMPLATE, &context)?))
    }
}
