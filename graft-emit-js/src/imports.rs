//! Import hoisting.

use graft_config::ModuleFormat;
use graft_ir::ImportInfo;
use indexmap::{IndexMap, IndexSet};

/// Tracks imports and deduplicates them.
///
/// Modules and selectors keep their first-use order. A selector whose name
/// is already bound, by an earlier import or by a reserved module-level
/// name, is imported under an alias (`name_1`, `name_2`, ...).
///
/// # Example
///
/// ```
/// use graft_config::ModuleFormat;
/// use graft_emit_js::ImportCollector;
///
/// let mut imports = ImportCollector::new();
/// imports.add("./util.js", "randomNext");
/// imports.add("./util.js", "randomNext");
/// imports.add("./seeded.js", "randomNext");
///
/// assert_eq!(
///     imports.render(ModuleFormat::Esm),
///     vec![
///         "import { randomNext } from \"./util.js\";",
///         "import { randomNext as randomNext_1 } from \"./seeded.js\";",
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportCollector {
    /// Module path -> selector -> local binding name
    modules: IndexMap<String, IndexMap<String, String>>,
    locals: IndexSet<String>,
}

impl ImportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every import referenced by `imports`, in order.
    pub fn from_imports<'a>(imports: impl IntoIterator<Item = &'a ImportInfo>) -> Self {
        let mut collector = Self::new();
        collector.extend(imports);
        collector
    }

    /// Mark names bound elsewhere in the module so imports never reuse them.
    /// Must be called before the clashing imports are added.
    pub fn reserve<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) -> &mut Self {
        self.locals.extend(names.into_iter().map(str::to_string));
        self
    }

    pub fn extend<'a>(&mut self, imports: impl IntoIterator<Item = &'a ImportInfo>) {
        for info in imports {
            self.add(&info.path, &info.selector);
        }
    }

    /// Add a selector import from a module, returning its local name.
    pub fn add(&mut self, path: &str, selector: &str) -> &str {
        let local = match self.modules.get(path).and_then(|m| m.get(selector)) {
            Some(local) => local.clone(),
            None => {
                let local = self.free_local(selector);
                self.locals.insert(local.clone());
                local
            }
        };

        self.modules
            .entry(path.to_string())
            .or_default()
            .entry(selector.to_string())
            .or_insert(local)
    }

    /// Local binding name for an import; the bare selector if not collected.
    pub fn local_name<'a>(&'a self, info: &'a ImportInfo) -> &'a str {
        self.modules
            .get(&info.path)
            .and_then(|m| m.get(&info.selector))
            .map_or(info.selector.as_str(), String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Number of distinct modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// One import statement per module.
    pub fn render(&self, format: ModuleFormat) -> Vec<String> {
        self.modules
            .iter()
            .map(|(path, selectors)| {
                let path = serde_json::to_string(path).unwrap_or_default();
                let bindings: Vec<String> = selectors
                    .iter()
                    .map(|(selector, local)| match format {
                        _ if selector == local => selector.clone(),
                        ModuleFormat::Esm => format!("{} as {}", selector, local),
                        ModuleFormat::CommonJs => format!("{}: {}", selector, local),
                    })
                    .collect();
                match format {
                    ModuleFormat::Esm => {
                        format!("import {{ {} }} from {};", bindings.join(", "), path)
                    }
                    ModuleFormat::CommonJs => {
                        format!("const {{ {} }} = require({});", bindings.join(", "), path)
                    }
                }
            })
            .collect()
    }

    fn free_local(&self, selector: &str) -> String {
        if !self.locals.contains(selector) {
            return selector.to_string();
        }
        (1..)
            .map(|n| format!("{}_{}", selector, n))
            .find(|candidate| !self.locals.contains(candidate))
            .unwrap_or_else(|| selector.to_string())
    }
}
