//! Common Lisp scripts.

use serde_json::json;

use super::{author, date};
use crate::plugin::{CreateContext, CreatorPlugin};
use crate::signal::{Creation, PluginError};

const TEMPLATE: &str = "#!/usr/bin/env clisp
;;; {{ name }}
;;; ...
;;; {{ author }}{{ date }}

";

pub struct LispPlugin;

impl CreatorPlugin for LispPlugin {
    fn names(&self) -> &[&'static str] {
        &["lisp", "clisp"]
    }

    fn extensions(&self) -> &[&'static str] {
        &[".lsp", ".lisp", ".cl"]
    }

    fn version(&self) -> &str {
        "0.0.2"
    }

    fn description(&self) -> &str {
        "Creates an executable clisp script."
    }

    fn create(&self, ctx: &mut CreateContext<'_>) -> Result<Creation, PluginError> {
        let context = json!({
            "name": ctx.stem(),
            "author": author(ctx.config()),
            "date": date(),
        });
        Ok(Creation::Content(ctx.render(TEMPLATE, &context)?))
    }
}
