//! Python scripts and unit test modules.

use anyhow::anyhow;
use serde_json::json;
use std::collections::BTreeSet;

use super::{author, date};
use crate::plugin::{CreateContext, CreatorPlugin};
use crate::signal::{Creation, Override, PluginError};

const TEMPLATE_BLANK: &str = "#!{{ shebangexe }}

\"\"\" {{ scriptname }}
    {{ explanation }}
    {{ author }}{{ date }}
\"\"\"
";

const TEMPLATE_MAIN: &str = "#!{{ shebangexe }}
# -*- coding: utf-8 -*-

\"\"\" {{ scriptname }}
    {{ explanation }}
    {{ author }}{{ date }}
\"\"\"

{{ imports }}

NAME = '{{ name }}'
VERSION = '{{ version }}'
VERSIONSTR = '{} v. {}'.format(NAME, VERSION)
SCRIPT = os.path.split(os.path.abspath(sys.argv[0]))[1]
SCRIPTDIR = os.path.abspath(sys.path[0])
{{ head }}

def {{ mainsignature }}:
    \"\"\" {{ maindoc }} \"\"\"
    return 0


if __name__ == '__main__':
    {{ mainif }}
";

const TEMPLATE_TEST: &str = "#!{{ shebangexe }}
# -*- coding: utf-8 -*-

\"\"\" {{ scriptname }}
    Unit tests for {{ testtarget }} v. {{ version }}
    {{ explanation }}
    {{ author }}{{ date }}
\"\"\"

{{ imports }}


class TestCase(unittest.TestCase):
    def test_function(self):
        \"\"\" test for ... \"\"\"
        pass


if __name__ == '__main__':
    sys.exit(unittest.main(argv=sys.argv))
";

const DOCOPT_HEAD: &str = "
USAGESTR = \"\"\"{versionstr}
    Usage:
        {script} [-h | -v]

    Options:
        -h,--help     : Show this help message.
        -v,--version  : Show version.
\"\"\".format(script=SCRIPT, versionstr=VERSIONSTR)
";

const DEFAULT_TEMPLATE: &str = "docopt";

const TEST_PREFIX: &str = "test_";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Base {
    Blank,
    Main,
    Test,
}

/// Settings for one template id.
struct Template {
    base: Base,
    imports: &'static [&'static str],
    head: &'static str,
    mainsignature: &'static str,
    maindoc: &'static str,
    mainif: &'static str,
}

fn main_template(
    imports: &'static [&'static str],
    head: &'static str,
    mainsignature: &'static str,
    maindoc: &'static str,
    mainif: &'static str,
) -> Template {
    Template {
        base: Base::Main,
        imports,
        head,
        mainsignature,
        maindoc,
        mainif,
    }
}

fn template(id: &str) -> Option<Template> {
    match id {
        "blank" | "none" => Some(Template {
            base: Base::Blank,
            ..main_template(&[], "", "", "", "")
        }),
        "normal" => Some(main_template(
            &["os", "sys"],
            "",
            "main(args)",
            "Main entry point, expects args from sys.",
            "sys.exit(main(sys.argv[1:]))",
        )),
        "docopt" | "doc" => Some(main_template(
            &["os", "sys", "docopt.docopt"],
            DOCOPT_HEAD,
            "main(argd)",
            "Main entry point, expects docopt arg dict as argd.",
            "mainret = main(docopt(USAGESTR, version=VERSIONSTR))\n    sys.exit(mainret)",
        )),
        "unittest" | "test" => Some(Template {
            base: Base::Test,
            ..main_template(&["sys", "unittest"], "", "", "", "")
        }),
        _ => None,
    }
}

/// `pkg.mod.name` becomes `from pkg.mod import name`, anything else `import name`.
fn import_line(module: &str) -> String {
    match module.rsplit_once('.') {
        Some((from, name)) if !from.is_empty() && !name.is_empty() => {
            format!("from {from} import {name}")
        }
        _ => format!("import {module}"),
    }
}

/// Sorted, deduplicated import lines.
fn import_lines<'m>(modules: impl IntoIterator<Item = &'m str>) -> String {
    let lines: BTreeSet<String> = modules.into_iter().map(import_line).collect();
    lines.into_iter().collect::<Vec<_>>().join("\n")
}

pub struct PythonPlugin;

impl CreatorPlugin for PythonPlugin {
    fn names(&self) -> &[&'static str] {
        &["python", "py"]
    }

    fn extensions(&self) -> &[&'static str] {
        &[".py"]
    }

    fn version(&self) -> &str {
        "0.2.0"
    }

    fn description(&self) -> &str {
        "Creates an executable python script or a unittest module."
    }

    fn usage(&self) -> Option<&str> {
        Some(
            "Usage:
    python [TEMPLATE] [IMPORT...]

Options:
    TEMPLATE  : Which template to use, see below.
                Can also be set in config as 'template'.
    IMPORT    : Extra modules to import, e.g. module1 module2.child

Templates:
    blank, none     : Only a shebang and the main doc string.
    docopt, doc     : A normal module with docopt boilerplate (default).
    normal          : A normal, executable, script module.
    unittest, test  : A unittest module, named test_<file>.py.",
        )
    }

    fn create(&self, ctx: &mut CreateContext<'_>) -> Result<Creation, PluginError> {
        let id = match ctx.arg(0) {
            Some(arg) => arg.to_lowercase(),
            None => ctx.config().get_str("template", DEFAULT_TEMPLATE).to_lowercase(),
        };
        let settings = template(&id).ok_or_else(|| anyhow!("No template by that name: {id}"))?;
        let extra = ctx.args().iter().skip(1).map(String::as_str);
        let imports = import_lines(extra.chain(settings.imports.iter().copied()));

        let mut scriptname = ctx.basename();
        let mut renamed = None;
        let mut testtarget = String::new();
        if settings.base == Base::Test {
            if scriptname.starts_with(TEST_PREFIX) {
                testtarget = scriptname[TEST_PREFIX.len()..].to_string();
            } else {
                testtarget = scriptname.clone();
                scriptname = format!("{TEST_PREFIX}{scriptname}");
                renamed = Some(ctx.filename().with_file_name(&scriptname));
            }
        }

        let context = json!({
            "shebangexe": ctx.config().get_str("shebangexe", "/usr/bin/env python3"),
            "scriptname": scriptname,
            "name": ctx.stem(),
            "version": ctx.config().get_str("default_version", "0.0.1"),
            "explanation": ctx.config().get_str("explanation", "..."),
            "author": author(ctx.config()),
            "date": date(),
            "imports": imports,
            "head": settings.head,
            "mainsignature": settings.mainsignature,
            "maindoc": settings.maindoc,
            "mainif": settings.mainif,
            "testtarget": testtarget,
        });
        let body = match settings.base {
            Base::Blank => TEMPLATE_BLANK,
            Base::Main => TEMPLATE_MAIN,
            Base::Test => TEMPLATE_TEST,
        };
        let content = ctx.render(body, &context)?;

        Ok(match renamed {
            Some(filename) => Creation::Override(Override {
                message: format!("Filename change: {}", filename.display()),
                filename,
                content,
            }),
            None => Creation::Content(content),
        })
    }
}
