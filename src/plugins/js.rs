//! Node/JS scripts.

use serde_json::json;

use super::{author, date};
use crate::plugin::{CreateContext, CreatorPlugin};
use crate::signal::{Creation, PluginError};

const HEADER: &str = "/*  {{ name }}
    ...
    {{ author }}{{ date }}
*/
";

const TEMPLATE: &str = "#!/usr/bin/env node

{{ header }}
/* jshint node:true, esnext:true, moz:true */

'use strict';
var docopt = require('docopt');

var name = '{{ name }}';
var version = '{{ version }}';
var version_str = `${name} v. ${version}`;
var scriptname = process.argv[1].split('/').slice(-1)[0];
var usage_str = `
    ${version_str}

    Usage:
        ${scriptname} [-h | -v]

    Options:
        -h,--help     : Show this message.
        -v,--version  : Print version and exit.
`;

function main(argd) {
    // Main entry point, expects an argument object from docopt.
    console.log('Hello.');
    return 0;
}

process.exit(
    main(
        docopt.docopt(usage_str, {'version': version_str})
    )
);
";

pub struct JsPlugin;

impl CreatorPlugin for JsPlugin {
    fn names(&self) -> &[&'static str] {
        &["js", "node", "nodejs"]
    }

    fn extensions(&self) -> &[&'static str] {
        &[".js"]
    }

    fn version(&self) -> &str {
        "0.0.6"
    }

    fn description(&self) -> &str {
        "Creates a node/js script with docopt boilerplate."
    }

    fn usage(&self) -> Option<&str> {
        Some(
            "Usage:
    js [-s]

Options:
    -s,--short  : Only use the comment header.",
        )
    }

    fn create(&self, ctx: &mut CreateContext<'_>) -> Result<Creation, PluginError> {
        let context = json!({
            "name": ctx.stem(),
            "author": author(ctx.config()),
            "date": date(),
            "version": ctx.config().get_str("default_version", "0.0.1"),
        });
        let header = ctx.render(HEADER, &context)?;
        if ctx.has_arg("^((-s)|(--short))$") {
            return Ok(Creation::Content(header));
        }
        let context = json!({
            "header": header,
            "name": ctx.stem(),
            "version": ctx.config().get_str("default_version", "0.0.1"),
        });
        Ok(Creation::Content(ctx.render(TEMPLATE, &context)?))
    }
}
