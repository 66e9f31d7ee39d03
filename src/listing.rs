//! Plugin listings, plugin help and config dumps for the terminal.

use std::fmt::Write;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::registry::Registry;

const LABEL_WIDTH: usize = 20;

fn plural(count: usize) -> &'static str {
    if count == 1 {
        "plugin"
    } else {
        "plugins"
    }
}

/// Lists creators with their aliases and extensions, then post plugins.
pub fn list_plugins(registry: &Registry) -> String {
    let mut out = String::new();
    let creators = registry.creators();
    if !creators.is_empty() {
        let _ = writeln!(out, "Found {} file-type {}:", creators.len(), plural(creators.len()));
        for creator in creators {
            let _ = writeln!(out, "    {}:", creator.name());
            if creator.names().len() > 1 {
                let _ = writeln!(
                    out,
                    "{:>LABEL_WIDTH$}: {}",
                    "aliases",
                    creator.names().join(", ")
                );
            }
            let extensions = if creator.extensions().is_empty() {
                "None".to_string()
            } else {
                creator.extensions().join(", ")
            };
            let _ = writeln!(out, "{:>LABEL_WIDTH$}: {extensions}", "extensions");
        }
    }

    for (deferred, label) in [(false, "post-processing"), (true, "deferred post-processing")] {
        let posts: Vec<_> = registry
            .all_post_plugins()
            .filter(|p| p.deferred() == deferred)
            .collect();
        if posts.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\nFound {} {label} {}:", posts.len(), plural(posts.len()));
        for post in posts {
            let _ = writeln!(out, "    {}:", post.name());
            let _ = writeln!(out, "        {}", post.description().replace('\n', "\n        "));
        }
    }
    out
}

/// Help text for a creator or post plugin.
///
/// # Errors
/// * `Error::NoMatchingPlugin` if no plugin has that name
pub fn plugin_help(registry: &Registry, name: &str) -> Result<String> {
    let mut out = String::new();
    if let Some(creator) = registry.find_by_name(name) {
        let _ = writeln!(out, "Help for {} v. {}:", creator.name(), creator.version());
        let _ = writeln!(out, "{}", creator.description());
        if let Some(usage) = creator.usage() {
            let _ = writeln!(out, "\n{usage}");
        }
        if !creator.ignore_post().is_empty() {
            let _ = writeln!(out, "\nSkips post plugins: {}", creator.ignore_post().join(", "));
        }
        return Ok(out);
    }
    if let Some(post) = registry.find_post(name) {
        let kind = if post.deferred() { "deferred post plugin" } else { "post plugin" };
        let _ = writeln!(out, "Help for {} v. {} ({kind}):", post.name(), post.version());
        let _ = writeln!(out, "{}", post.description());
        return Ok(out);
    }
    Err(Error::NoMatchingPlugin(name.to_string()))
}

/// Pretty JSON of the whole config, or of one plugin's merged config.
pub fn dump_config(config: &Config, plugin: Option<&str>) -> Result<String> {
    let (title, value, empty) = match plugin {
        Some(name) => {
            let plugin_config = config.for_plugin(name);
            (format!("Config for: {name}"), plugin_config.as_value(), plugin_config.is_empty())
        }
        None => {
            let title = match config.source() {
                Some(path) => format!("Config from: {}", path.display()),
                None => "Config:".to_string(),
            };
            (title, config.to_value(), config.is_empty())
        }
    };
    if empty {
        return Ok(match plugin {
            Some(name) => format!("No config for: {name}"),
            None => "No config found.".to_string(),
        });
    }
    let pretty = serde_json::to_string_pretty(&value)
        .map_err(|e| Error::ConfigError(e.to_string()))?;
    Ok(format!("{title}\n{pretty}"))
}
