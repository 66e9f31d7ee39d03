//! Bash scripts.

use serde_json::json;

use super::{author, date};
use crate::plugin::{CreateContext, CreatorPlugin};
use crate::signal::{Creation, PluginError};

const TEMPLATE: &str = "#!/usr/bin/env bash

# {{ name }}
# ...
# {{ author }}{{ date }}

appname=\"{{ name }}\"
appversion=\"0.0.1\"
apppath=\"$(readlink -f \"${BASH_SOURCE[0]}\")\"
appscript=\"${apppath##*/}\"
appdir=\"${apppath%/*}\"
";

pub struct BashPlugin;

impl CreatorPlugin for BashPlugin {
    fn names(&self) -> &[&'static str] {
        &["bash", "sh"]
    }

    fn extensions(&self) -> &[&'static str] {
        &[".sh", ".bash"]
    }

    fn version(&self) -> &str {
        "0.0.2"
    }

    fn description(&self) -> &str {
        "Creates a bash script with a few common variables set."
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
