//! C and C++ source files.

use log::debug;
use serde_json::json;

use super::{author, date};
use crate::plugin::{CreateContext, CreatorPlugin};
use crate::plugins::makefile::AUTOMAKEFILE;
use crate::signal::{Creation, PluginError};

const TEMPLATE: &str = "/*  {{ filename }}
    ...
    {{ author }}{{ date }}
*/

#include <{{ include }}>
{{ namespace }}
int main(int argc, char *argv[]) {

    return 0;
}
";

const TEMPLATE_LIB: &str = "/* {{ filename }}
    ...
    {{ author }}{{ date }}
*/

";

const CPP_EXTENSIONS: [&str; 2] = [".cpp", ".cc"];

pub struct CPlugin;

impl CreatorPlugin for CPlugin {
    fn names(&self) -> &[&'static str] {
        &["c", "cpp", "c++", "cc"]
    }

    fn extensions(&self) -> &[&'static str] {
        &[".c", ".cpp", ".cc"]
    }

    fn version(&self) -> &str {
        "0.0.4"
    }

    fn description(&self) -> &str {
        "Creates a basic C or C++ file for small programs.\n\
         If no Makefile exists, it will be created with basic targets.\n\
         The Makefile is provided by the automakefile plugin."
    }

    fn usage(&self) -> Option<&str> {
        Some(
            "Usage:
    c [l]

Options:
    l,lib  : Treat as a library file, automakefile will not run.",
        )
    }

    fn ignore_post(&self) -> &[&'static str] {
        &["chmodx"]
    }

    fn create(&self, ctx: &mut CreateContext<'_>) -> Result<Creation, PluginError> {
        let library = ctx.has_arg("^l(ib)?$");
        if library {
            debug!("Library file mode, no automakefile.");
            ctx.suppress(AUTOMAKEFILE);
        }

        let filename = ctx.basename();
        let lowered = filename.to_lowercase();
        let cpp = CPP_EXTENSIONS.iter().any(|ext| lowered.ends_with(ext));
        let (include, namespace) = if cpp {
            ("iostream", "\nusing std::cout;\nusing std::endl;\n")
        } else {
            ("stdio.h", "")
        };

        let context = json!({
            "filename": filename,
            "author": author(ctx.config()),
            "date": date(),
            "include": include,
            "namespace": namespace,
        });
        let template = if library { TEMPLATE_LIB } else { TEMPLATE };
        Ok(Creation::Content(ctx.render(template, &context)?))
    }
}
