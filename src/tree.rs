//! Hierarchical document tree produced by parsing a configuration file.

use std::collections::BTreeMap;
use std::fmt;

/// A named node in a parsed configuration document.
///
/// A category owns an ordered map of child categories and an ordered map of
/// leaf string values. File adapters build one tree per parse, root first,
/// and the tree is treated as immutable afterwards.
///
/// A name is unique among siblings across both maps: the same name may not
/// simultaneously refer to a category and a value at one level. The insert
/// helpers enforce this with first-write-wins semantics.
///
/// ## Example
///
/// ```
/// use layerconf::Category;
///
/// let mut server = Category::new("server");
/// server.insert_value("listen", ":3000");
///
/// let mut root = Category::new("/");
/// root.insert_category(server);
///
/// assert_eq!(root.find("server.listen"), Some(":3000"));
/// assert_eq!(root.find("server.port"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Category {
    name: String,
    categories: BTreeMap<String, Category>,
    values: BTreeMap<String, String>,
}

impl Category {
    /// Creates an empty category.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            categories: BTreeMap::new(),
            values: BTreeMap::new(),
        }
    }

    /// The category's own name (`"/"` for adapter-built roots).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a leaf value.
    ///
    /// Silently skipped if a child category already holds the name; adding
    /// the same value name twice overwrites.
    pub fn insert_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if self.categories.contains_key(&name) {
            return;
        }
        self.values.insert(name, value.into());
    }

    /// Adds a child category under its own name.
    ///
    /// Silently skipped if a value already holds the name; adding a child
    /// with the same name twice overwrites.
    pub fn insert_category(&mut self, child: Category) {
        if self.values.contains_key(child.name()) {
            return;
        }
        self.categories.insert(child.name.clone(), child);
    }

    /// Looks up a direct child category.
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.get(name)
    }

    /// Looks up a direct leaf value.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// True if the category holds no children and no values.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.values.is_empty()
    }

    /// Resolves a dotted path like `"a.b.c"` to a leaf value.
    ///
    /// Every non-terminal segment must name an existing child category; the
    /// terminal segment is looked up in the value map of the node reached.
    /// Segments are matched by exact string equality. A terminal segment
    /// that names a category rather than a value is a miss, as is the empty
    /// path (it is a single empty segment, looked up as a value key).
    pub fn find(&self, path: &str) -> Option<&str> {
        let mut node = self;
        let mut segments = path.split('.');
        let mut leaf = segments.next()?;
        for next in segments {
            node = node.category(leaf)?;
            leaf = next;
        }
        node.value(leaf)
    }

    fn write_entries(&self, f: &mut fmt::Formatter<'_>, prefix: &str) -> fmt::Result {
        for (name, value) in &self.values {
            writeln!(f, "{prefix}{name} = {value}")?;
        }
        for (name, child) in &self.categories {
            child.write_entries(f, &format!("{prefix}{name}."))?;
        }
        Ok(())
    }
}

/// Dumps every leaf as a fully qualified `path = value` line.
///
/// The node's own name is not part of the printed paths, so displaying a
/// root prints exactly the dotted paths [`find`](Category::find) accepts.
impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_entries(f, "")
    }
}
