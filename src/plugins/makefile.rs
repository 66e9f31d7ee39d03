//! Makefiles for C, C++ and Rust sources.
//!
//! `makefile` creates one on request; `automakefile` creates one after a C or
//! Rust file was written, unless a makefile already sits next to it.

use log::debug;
use serde_json::json;
use std::path::{Path, PathBuf};

use crate::config::ConfigProvider;
use crate::error::Result;
use crate::plugin::{CreateContext, CreatorPlugin, PostContext, PostPlugin};
use crate::renderer::TemplateRenderer;
use crate::signal::{Abort, Creation, Override, PluginError};

/// Version shared by both makefile plugins.
const VERSION: &str = "0.0.4";

pub const AUTOMAKEFILE: &str = "automakefile";

pub const MAKEFILE: &str = "makefile";

const DEFAULT_MAKEFILE: &str = "Makefile";

/// Names checked before `automakefile` writes anything.
const EXISTING_NAMES: [&str; 2] = ["Makefile", "makefile"];

/// Creators whose files get an automatic makefile.
const AUTO_CREATORS: [&str; 2] = ["c", "rust"];

const TEMPLATE: &str = "SHELL=bash
{{ compilervar }}={{ compiler }}
{{ cflagsvar }}={{ cflags }}
binary={{ binary }}
source={{ filename }}
{% if compiler == \"rustc\" %}
all: $(source)
\t$({{ compilervar }}) -o $(binary) $({{ cflagsvar }}) $(source)
{% else %}
all: {{ objects }}
\t$({{ compilervar }}) -o $(binary) $({{ cflagsvar }}) -O3 *.o

{{ objects }}: $(source)
\t$({{ compilervar }}) -c $(source) $({{ cflagsvar }})

debug: {{ objects }}
\t$({{ compilervar }}) -o $(binary) $({{ cflagsvar }}) -Og *.o
{% endif %}
.PHONY: clean
clean:
\t-@rm -f $(binary) *.o
";

/// Compiler settings picked by source extension.
struct CompilerOptions {
    compiler: &'static str,
    compilervar: &'static str,
    cflagsvar: &'static str,
    cflags: &'static str,
}

fn compiler_options(source: &Path) -> CompilerOptions {
    let ext = source
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "cpp" | "cc" => CompilerOptions {
            compiler: "g++",
            compilervar: "CXX",
            cflagsvar: "CXXFLAGS",
            cflags: "-std=c++11 -Wall",
        },
        "rs" => CompilerOptions {
            compiler: "rustc",
            compilervar: "RUSTC",
            cflagsvar: "RUSTFLAGS",
            cflags: "",
        },
        _ => CompilerOptions {
            compiler: "gcc",
            compilervar: "CC",
            cflagsvar: "CFLAGS",
            cflags: "-std=c11 -Wall",
        },
    }
}

/// Renders a makefile for `source`.
///
/// Returns the makefile path (next to `source`) and its content.
pub fn render_makefile(
    renderer: &dyn TemplateRenderer,
    source: &Path,
    makefile_name: &str,
) -> Result<(PathBuf, String)> {
    let parent = source.parent().unwrap_or_else(|| Path::new(""));
    let filename = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let binary = source
        .file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let options = compiler_options(source);
    debug!("Rendering makefile template for {}.", options.compiler);

    let context = json!({
        "compiler": options.compiler,
        "compilervar": options.compilervar,
        "cflagsvar": options.cflagsvar,
        "cflags": options.cflags,
        "binary": binary,
        "filename": filename,
        "objects": format!("{binary}.o"),
    });
    let content = renderer.render(TEMPLATE, &context)?;
    Ok((parent.join(makefile_name), content))
}

fn makefile_name(config: &dyn ConfigProvider) -> String {
    config.get_str("default_filename", DEFAULT_MAKEFILE)
}

/// Creates a makefile for a given source file on request.
pub struct MakefilePlugin;

impl CreatorPlugin for MakefilePlugin {
    fn names(&self) -> &[&'static str] {
        &[MAKEFILE, "make"]
    }

    fn extensions(&self) -> &[&'static str] {
        &[]
    }

    fn version(&self) -> &str {
        VERSION
    }

    fn description(&self) -> &str {
        "Creates a basic makefile for a given c or rust file name."
    }

    fn usage(&self) -> Option<&str> {
        Some(
            "Usage:
    makefile SOURCE [MAKEFILE_NAME]

Options:
    MAKEFILE_NAME  : Desired file name for the makefile.
                     Can also be set in config as 'default_filename'.",
        )
    }

    fn ignore_post(&self) -> &[&'static str] {
        &["chmodx"]
    }

    fn create(&self, ctx: &mut CreateContext<'_>) -> std::result::Result<Creation, PluginError> {
        let source = ctx.filename().to_path_buf();
        if !(ctx.dry_run() || source.exists()) {
            let question = format!(
                "The target source file doesn't exist: {}\nContinue anyway?",
                source.display()
            );
            if !ctx.confirm(&question)? {
                return Err(Abort::new("User cancelled.").into());
            }
        }

        let name = ctx
            .arg(0)
            .map(str::to_string)
            .unwrap_or_else(|| makefile_name(ctx.config()));
        let (makefile, content) = render_makefile(ctx.renderer(), &source, &name)?;

        Ok(Creation::Override(Override {
            message: format!(
                "Creating a makefile for: {}\n              File path: {}",
                ctx.basename(),
                makefile.display()
            ),
            filename: makefile,
            content,
        }))
    }
}

/// Creates a makefile after a C or Rust file was written.
pub struct MakefilePost;

impl PostPlugin for MakefilePost {
    fn name(&self) -> &str {
        AUTOMAKEFILE
    }

    fn version(&self) -> &str {
        VERSION
    }

    fn description(&self) -> &str {
        "Creates a makefile for new C files.\nThis will not overwrite existing makefiles."
    }

    /// Shares the `makefile` creator's settings.
    fn config_section(&self) -> &str {
        MAKEFILE
    }

    fn process(&self, ctx: &PostContext<'_>) -> std::result::Result<(), PluginError> {
        if !AUTO_CREATORS.contains(&ctx.creator.name()) {
            return Ok(());
        }

        let parent = ctx.filename.parent().unwrap_or_else(|| Path::new(""));
        for existing in EXISTING_NAMES {
            let path = parent.join(existing);
            if path.exists() {
                debug!("Makefile already exists: {}", path.display());
                return Ok(());
            }
        }

        debug!("Creating a makefile for: {}", ctx.filename.display());
        let (makefile, content) =
            render_makefile(ctx.renderer, ctx.filename, &makefile_name(ctx.config))?;
        if ctx.dry_run {
            println!("Would've created makefile: {}", makefile.display());
            return Ok(());
        }
        std::fs::write(&makefile, content)?;
        println!("Makefile created: {}", makefile.display());
        Ok(())
    }
}
