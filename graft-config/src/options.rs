//! Compiler options.

use std::str::FromStr;

use serde::Deserialize;

use crate::{Error, Result, validate::ParseContext};

/// Output module system of the emitted code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
pub enum ModuleFormat {
    /// `import`/`export` syntax.
    #[default]
    #[serde(rename = "esm")]
    Esm,
    /// `require`/`module.exports` syntax.
    #[serde(rename = "commonjs")]
    CommonJs,
}

impl ModuleFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleFormat::Esm => "esm",
            ModuleFormat::CommonJs => "commonjs",
        }
    }
}

/// Immutable settings for one compilation run.
///
/// Options are built once, before the run starts, and passed by shared
/// reference into every hook. Nothing in the compiler mutates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerOptions {
    pub module_format: ModuleFormat,
    /// Target environment flag: keep debug-only code.
    pub debug: bool,
    /// Conditional-compilation symbols, in declaration order.
    pub define: Vec<String>,
    /// Names of the extensions to enable, in priority order.
    pub plugins: Vec<String>,
    /// Owner-name prefixes whose unresolved calls produce a warning.
    pub warn_passthrough: Vec<String>,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            module_format: ModuleFormat::default(),
            debug: false,
            define: Vec::new(),
            plugins: Vec::new(),
            warn_passthrough: default_warn_passthrough(),
        }
    }
}

impl CompilerOptions {
    /// Set the output module format.
    pub fn with_module_format(mut self, module_format: ModuleFormat) -> Self {
        self.module_format = module_format;
        self
    }

    /// Enable or disable debug mode.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Add a conditional-compilation symbol.
    pub fn define(mut self, symbol: impl Into<String>) -> Self {
        self.define.push(symbol.into());
        self
    }

    /// Append an extension name to the plugin list.
    pub fn plugin(mut self, name: impl Into<String>) -> Self {
        self.plugins.push(name.into());
        self
    }

    /// Replace the pass-through warning prefixes.
    pub fn with_warn_passthrough<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.warn_passthrough = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Check whether a conditional-compilation symbol is defined.
    pub fn is_defined(&self, symbol: &str) -> bool {
        self.define.iter().any(|s| s == symbol)
    }

    /// Whether an unresolved call to `owner` should be reported.
    pub fn warns_on_passthrough(&self, owner: &str) -> bool {
        self.warn_passthrough
            .iter()
            .any(|prefix| owner.starts_with(prefix.as_str()))
    }

    /// Parse options from graft.toml content with a custom filename for errors.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let raw: RawConfig =
            toml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;
        let options = raw.into_options();
        ParseContext::new(content, filename).validate(&options)?;
        Ok(options)
    }
}

impl FromStr for CompilerOptions {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "graft.toml")
    }
}

fn default_warn_passthrough() -> Vec<String> {
    vec!["System.".to_string()]
}

/// On-disk layout of graft.toml.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    compiler: RawCompiler,
    #[serde(default)]
    diagnostics: RawDiagnostics,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCompiler {
    #[serde(default)]
    module_format: ModuleFormat,
    #[serde(default)]
    debug: bool,
    #[serde(default)]
    define: Vec<String>,
    #[serde(default)]
    plugins: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDiagnostics {
    #[serde(default = "default_warn_passthrough")]
    warn_passthrough: Vec<String>,
}

impl Default for RawDiagnostics {
    fn default() -> Self {
        Self {
            warn_passthrough: default_warn_passthrough(),
        }
    }
}

impl RawConfig {
    fn into_options(self) -> CompilerOptions {
        CompilerOptions {
            module_format: self.compiler.module_format,
            debug: self.compiler.debug,
            define: self.compiler.define,
            plugins: self.compiler.plugins,
            warn_passthrough: self.diagnostics.warn_passthrough,
        }
    }
}
