//! HTML pages.

use serde_json::json;

use crate::plugin::{CreateContext, CreatorPlugin};
use crate::signal::{Creation, PluginError};

const TEMPLATE: &str = "<!DOCTYPE html>
<html lang=\"{{ lang }}\">
<head>
    <meta charset=\"utf-8\">
    <title>{{ title }}</title>
</head>
<body>

</body>
</html>
";

pub struct HtmlPlugin;

impl CreatorPlugin for HtmlPlugin {
    fn names(&self) -> &[&'static str] {
        &["html", "htm"]
    }

    fn extensions(&self) -> &[&'static str] {
        &[".html", ".htm"]
    }

    fn description(&self) -> &str {
        "Creates a basic HTML5 page."
    }

    fn ignore_post(&self) -> &[&'static str] {
        &["chmodx"]
    }

    fn create(&self, ctx: &mut CreateContext<'_>) -> Result<Creation, PluginError> {
        let context = json!({
            "title": ctx.arg(0).map(str::to_string).unwrap_or_else(|| ctx.stem()),
            "lang": ctx.config().get_str("lang", "en"),
        });
        Ok(Creation::Content(ctx.render(TEMPLATE, &context)?))
    }
}
