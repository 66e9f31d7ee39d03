//! Built-in plugins.
//!
//! Registration is an explicit list: every creator and post plugin shipped
//! with newfile is returned from the functions below, in run order for post
//! plugins.

use crate::config::ConfigProvider;
use crate::plugin::{CreatorPlugin, PostPlugin};

pub mod bash;
pub mod bats;
pub mod c;
pub mod chmodx;
pub mod html;
pub mod js;
pub mod lisp;
pub mod makefile;
pub mod open;
pub mod perl;
pub mod php;
pub mod python;
pub mod rust;
pub mod text;

/// Every built-in creator plugin.
pub fn builtin_creators() -> Vec<Box<dyn CreatorPlugin>> {
    vec![
        Box::new(bash::BashPlugin),
        Box::new(bats::BatsPlugin),
        Box::new(c::CPlugin),
        Box::new(html::HtmlPlugin),
        Box::new(js::JsPlugin),
        Box::new(lisp::LispPlugin),
        Box::new(makefile::MakefilePlugin),
        Box::new(perl::PerlPlugin),
        Box::new(php::PhpPlugin),
        Box::new(python::PythonPlugin),
        Box::new(rust::RustPlugin),
        Box::new(text::TextPlugin),
    ]
}

/// Every built-in post plugin, in registration order.
pub fn builtin_post_plugins() -> Vec<Box<dyn PostPlugin>> {
    vec![
        Box::new(chmodx::ChmodxPlugin::default()),
        Box::new(makefile::MakefilePost),
        Box::new(open::OpenPlugin::default()),
    ]
}

/// Today's date as used in file headers.
pub fn date() -> String {
    chrono::Local::now().format("%m-%d-%Y").to_string()
}

/// Author prefix for file headers, e.g. `-Jane `. Empty when not configured.
pub fn author(config: &dyn ConfigProvider) -> String {
    config
        .get_opt_str("author")
        .map(|author| format!("-{author} "))
        .unwrap_or_default()
}
