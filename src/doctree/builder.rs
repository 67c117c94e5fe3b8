//! Tree builder - walks a source hierarchy and assembles the documentation tree.
//!
//! Folders become `folder` nodes, every loadable file becomes a `module` node, and module members
//! that are classes or routines become `class` / `function` children. Files of a directory may be
//! loaded on the rayon pool; children are always appended in sorted order by the calling thread.

use rayon::prelude::*;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::ScribeConfig;
use crate::doctree::classifier::{classify, is_documentable_member, is_public_method, SymbolClass};
use crate::doctree::metadata::MetadataExtractor;
use crate::doctree::node::{DocNode, Metadata};
use crate::error::{Result, ScribeError};
use crate::extractors::{CodeLoader, ExtractorManager, Introspectable};
use crate::markup::MarkupRenderer;
use crate::utils::file_utils;
use crate::utils::ignore::{is_ignored_by_pattern, load_transcribeignore};
use crate::utils::paths::{folder_href, href_to_dotted, join_href, to_relative_unix_style};

/// Href segment grouping classes when classes are not separated
const CLASSES_SEGMENT: &str = "classes";
/// Href segment grouping routines when functions are not separated
const ROUTINES_SEGMENT: &str = "routines";

/// Per-run walk state
struct Walk {
    root: PathBuf,
    package: String,
    ignore: Vec<String>,
}

impl Walk {
    fn relative(&self, path: &Path) -> Result<String> {
        to_relative_unix_style(path, &self.root).map_err(|e| ScribeError::load(path, e))
    }

    fn is_ignored(&self, path: &Path) -> Result<bool> {
        Ok(is_ignored_by_pattern(&self.relative(path)?, &self.ignore))
    }
}

/// Builds documentation trees from source directories
pub struct Scribe<L: CodeLoader = ExtractorManager> {
    config: ScribeConfig,
    loader: L,
    extractor: MetadataExtractor,
}

impl Scribe<ExtractorManager> {
    /// Scribe with the static Python loader
    pub fn new(config: ScribeConfig) -> Self {
        Self::with_loader(config, ExtractorManager::new())
    }
}

impl Default for Scribe<ExtractorManager> {
    fn default() -> Self {
        Self::new(ScribeConfig::default())
    }
}

impl<L: CodeLoader> Scribe<L> {
    pub fn with_loader(config: ScribeConfig, loader: L) -> Self {
        let renderer = MarkupRenderer::new().with_report_level(config.report_level);
        Self {
            config,
            loader,
            extractor: MetadataExtractor::new(renderer),
        }
    }

    /// Document `in_path` and write the tree as JSON to `out_path`
    ///
    /// Parent directories of `out_path` are created. Nothing is written when the walk fails.
    pub fn transcribe(&self, in_path: &Path, out_path: &Path) -> Result<DocNode> {
        let tree = self.doctree(in_path)?;

        if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(fs::File::create(out_path)?);
        serde_json::to_writer(&mut writer, &tree)?;
        writer.flush()?;

        info!("Wrote documentation tree to {}", out_path.display());
        Ok(tree)
    }

    /// Build the documentation tree rooted at `in_path`
    pub fn doctree(&self, in_path: &Path) -> Result<DocNode> {
        let package = package_name(in_path)?;
        let mut ignore = load_transcribeignore(in_path).map_err(|e| ScribeError::load(in_path, e))?;
        ignore.extend(self.config.exclude.iter().cloned());

        let walk = Walk {
            root: in_path.to_path_buf(),
            package,
            ignore,
        };

        info!(
            "Documenting package '{}' from {}",
            walk.package,
            in_path.display()
        );
        let tree = self.get_doctree(&walk, in_path)?;
        info!(
            "Documented {} nodes for package '{}'",
            tree.walk().len(),
            walk.package
        );
        Ok(tree)
    }

    fn get_doctree(&self, walk: &Walk, dir: &Path) -> Result<DocNode> {
        let href = folder_href(dir, &walk.root).map_err(|e| ScribeError::load(dir, e))?;
        let name = if dir == walk.root {
            walk.package.clone()
        } else {
            dir.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        };

        let mut entries: Vec<(PathBuf, bool)> = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            entries.push((path, entry.file_type()?.is_dir()));
        }
        entries.sort_by(|a, b| a.0.file_name().cmp(&b.0.file_name()));

        let mut subdirs = Vec::new();
        let mut files = Vec::new();
        for (path, is_dir) in entries {
            if walk.is_ignored(&path)? {
                debug!("Ignoring {}", path.display());
                continue;
            }
            if is_dir {
                if !file_utils::is_skipped_directory(&path) {
                    subdirs.push(path);
                }
            } else if path.is_file() && self.loader.accepts(&path) {
                files.push(path);
            }
        }

        let mut children = Vec::with_capacity(subdirs.len() + files.len());
        for subdir in &subdirs {
            children.push(self.get_doctree(walk, subdir)?);
        }

        let modules: Vec<DocNode> = if self.config.parallel {
            files
                .par_iter()
                .map(|file| self.document_file(walk, file, &href))
                .collect::<Result<Vec<_>>>()?
        } else {
            files
                .iter()
                .map(|file| self.document_file(walk, file, &href))
                .collect::<Result<Vec<_>>>()?
        };
        children.extend(modules);

        let path = href_to_dotted(&walk.package, &href);
        Ok(DocNode::folder(name, href, path, children))
    }

    fn document_file(&self, walk: &Walk, file: &Path, parent_href: &str) -> Result<DocNode> {
        debug!("Loading {}", file.display());
        let module = self.loader.load(file)?;
        self.document(&module, parent_href, &walk.package)
    }

    /// Document one object below `parent_href`, dispatching on its classification
    pub fn document<T: Introspectable>(
        &self,
        object: &T,
        parent_href: &str,
        package: &str,
    ) -> Result<DocNode> {
        match classify(object)? {
            SymbolClass::Module => self.doc_module(object, parent_href, package),
            SymbolClass::Class => self.doc_class(object, parent_href, package),
            SymbolClass::Routine => self.doc_routine(object, parent_href, package),
        }
    }

    fn doc_module<T: Introspectable>(
        &self,
        object: &T,
        parent_href: &str,
        package: &str,
    ) -> Result<DocNode> {
        let metadata = self.extractor.extract(object)?;
        let href = join_href(parent_href, symbol_name(object)?);
        let path = href_to_dotted(package, &href);

        let children = sorted_by_name(
            object
                .members()
                .iter()
                .filter(|member| is_documentable_member(*member)),
        )
        .into_iter()
        .map(|member| self.document(member, &href, package))
        .collect::<Result<Vec<_>>>()?;

        debug!("Documented module {} ({} children)", path, children.len());
        Ok(DocNode::module(metadata, href, path, children))
    }

    fn doc_class<T: Introspectable>(
        &self,
        object: &T,
        parent_href: &str,
        package: &str,
    ) -> Result<DocNode> {
        let metadata = self.extractor.extract(object)?;
        let name = symbol_name(object)?;
        let path = href_to_dotted(package, &join_href(parent_href, name));
        let href = if self.config.separate_classes {
            join_href(parent_href, name)
        } else {
            join_href(&join_href(parent_href, CLASSES_SEGMENT), name)
        };

        let methods = sorted_by_name(object.members().iter().filter(|m| is_public_method(*m)))
            .into_iter()
            .map(|method| self.extractor.extract(method))
            .collect::<Result<Vec<Metadata>>>()?;

        debug!("Documented class {} ({} methods)", path, methods.len());
        Ok(DocNode::class(metadata, href, path, methods))
    }

    fn doc_routine<T: Introspectable>(
        &self,
        object: &T,
        parent_href: &str,
        package: &str,
    ) -> Result<DocNode> {
        let metadata = self.extractor.extract(object)?;
        let name = symbol_name(object)?;
        let path = href_to_dotted(package, &join_href(parent_href, name));
        let href = if self.config.separate_functions {
            join_href(parent_href, name)
        } else {
            join_href(&join_href(parent_href, ROUTINES_SEGMENT), name)
        };

        debug!("Documented routine {}", path);
        Ok(DocNode::function(metadata, href, path))
    }
}

/// Serialize a tree to compact JSON
pub fn to_json(tree: &DocNode) -> Result<String> {
    Ok(serde_json::to_string(tree)?)
}

/// Root package name: final component of the input directory
fn package_name(in_path: &Path) -> Result<String> {
    let name = match in_path.file_name() {
        Some(name) => name.to_os_string(),
        None => fs::canonicalize(in_path)?
            .file_name()
            .map(|name| name.to_os_string())
            .ok_or_else(|| ScribeError::load(in_path, "input directory has no name"))?,
    };
    name.into_string()
        .map_err(|_| ScribeError::load(in_path, "input directory name is not valid UTF-8"))
}

fn symbol_name<T: Introspectable + ?Sized>(object: &T) -> Result<&str> {
    object.name().ok_or_else(|| ScribeError::Classification {
        name: "<anonymous>".to_string(),
        type_name: object.type_name().to_string(),
    })
}

/// Members ordered by name, like `inspect.getmembers`
fn sorted_by_name<'a, T, I>(members: I) -> Vec<&'a T>
where
    T: Introspectable + 'a,
    I: Iterator<Item = &'a T>,
{
    let mut members: Vec<&T> = members.collect();
    members.sort_by(|a, b| a.name().cmp(&b.name()));
    members
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doctree::node::NodeType;
    use crate::markup::DESCRIPTION;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use tempfile::TempDir;

    const MOD_PY: &str = r#""""Module summary.

More about the module.
"""

__version__ = "$Revision: 42 $"
__author__ = "Ada"


class Thing:
    """A thing."""

    def __init__(self, size, name='x'):
        self.size = size

    def go(self, speed=1):
        """Go somewhere."""

    def _priv(self):
        pass


def run(a, b=1) -> int:
    """Run it."""
    return a + b
"#;

    /// `pkg/mod.py` inside a fresh temp dir; returns (guard, package path)
    fn sample_package() -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let pkg = temp_dir.path().join("pkg");
        fs::create_dir(&pkg).unwrap();
        fs::write(pkg.join("mod.py"), MOD_PY).unwrap();
        (temp_dir, pkg)
    }

    fn scribe() -> Scribe {
        Scribe::new(ScribeConfig::default())
    }

    fn hrefs(tree: &DocNode) -> Vec<String> {
        tree.walk().iter().map(|node| node.href.clone()).collect()
    }

    #[test]
    fn test_end_to_end_package() {
        let (_guard, pkg) = sample_package();
        let tree = scribe().doctree(&pkg).unwrap();

        assert_eq!(tree.node_type, NodeType::Folder);
        assert_eq!(tree.href, "/");
        assert_eq!(tree.path, "pkg");
        assert_eq!(tree.name(), Some("pkg"));

        let module = &tree.children()[0];
        assert_eq!(module.node_type, NodeType::Module);
        assert_eq!(module.href, "/mod");
        assert_eq!(module.path, "pkg.mod");
        assert_eq!(module.metadata.version.as_deref(), Some("42"));
        assert_eq!(module.metadata.author.as_deref(), Some("Ada"));
        assert_eq!(module.metadata.signature, None);

        let kinds: Vec<(NodeType, &str)> = module
            .children()
            .iter()
            .map(|child| (child.node_type, child.href.as_str()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (NodeType::Class, "/mod/Thing"),
                (NodeType::Function, "/mod/run"),
            ]
        );

        let class = &module.children()[0];
        assert_eq!(class.path, "pkg.mod.Thing");
        assert_eq!(class.metadata.signature.as_deref(), Some("(size, name='x')"));
        let method_names: Vec<_> = class
            .methods()
            .iter()
            .map(|m| m.name.as_deref().unwrap())
            .collect();
        assert_eq!(method_names, vec!["go"]);
        assert_eq!(class.methods()[0].signature.as_deref(), Some("(self, speed=1)"));

        let run = &module.children()[1];
        assert_eq!(run.path, "pkg.mod.run");
        assert_eq!(run.metadata.signature.as_deref(), Some("(a, b=1) -> int"));
        assert!(run.children.is_none() && run.methods.is_none());
    }

    #[test]
    fn test_transcribe_writes_json_and_creates_parents() {
        let (guard, pkg) = sample_package();
        let out = guard.path().join("out/nested/tree.json");

        let tree = scribe().transcribe(&pkg, &out).unwrap();

        let written = fs::read_to_string(&out).unwrap();
        let parsed: DocNode = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, tree);
        assert_eq!(written, to_json(&tree).unwrap());
    }

    #[test]
    fn test_repeated_runs_are_byte_identical() {
        let (_guard, pkg) = sample_package();
        fs::create_dir(pkg.join("sub")).unwrap();
        fs::write(pkg.join("sub/b.py"), "def b():\n    pass\n").unwrap();
        fs::write(pkg.join("sub/a.py"), "class A:\n    pass\n").unwrap();

        let parallel = scribe();
        let sequential = Scribe::new(ScribeConfig {
            parallel: false,
            ..Default::default()
        });

        let first = to_json(&parallel.doctree(&pkg).unwrap()).unwrap();
        let second = to_json(&parallel.doctree(&pkg).unwrap()).unwrap();
        let third = to_json(&sequential.doctree(&pkg).unwrap()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, third);
    }

    #[test]
    fn test_subdirectories_come_first_and_hrefs_are_relative() {
        let (_guard, pkg) = sample_package();
        fs::create_dir_all(pkg.join("sub/deep")).unwrap();
        fs::write(pkg.join("sub/deep/leaf.py"), "def leaf():\n    pass\n").unwrap();
        fs::write(pkg.join("a_first.py"), "").unwrap();

        let tree = scribe().doctree(&pkg).unwrap();

        let top: Vec<&str> = tree.children().iter().map(|c| c.href.as_str()).collect();
        assert_eq!(top, vec!["/sub", "/a_first", "/mod"]);

        let leaf = tree.find("/sub/deep/leaf/leaf").unwrap();
        assert_eq!(leaf.path, "pkg.sub.deep.leaf.leaf");
        let deep = tree.find("/sub/deep").unwrap();
        assert_eq!(deep.node_type, NodeType::Folder);
        assert_eq!(deep.name(), Some("deep"));
        assert_eq!(deep.path, "pkg.sub.deep");
    }

    #[test]
    fn test_hrefs_are_unique() {
        let (_guard, pkg) = sample_package();
        fs::create_dir(pkg.join("sub")).unwrap();
        fs::write(pkg.join("sub/mod.py"), "def run():\n    pass\n").unwrap();

        for config in [
            ScribeConfig::default(),
            ScribeConfig {
                separate_classes: false,
                separate_functions: false,
                ..Default::default()
            },
        ] {
            let tree = Scribe::new(config).doctree(&pkg).unwrap();
            let all = hrefs(&tree);
            let unique: HashSet<&String> = all.iter().collect();
            assert_eq!(unique.len(), all.len(), "Duplicate hrefs in {:?}", all);
        }
    }

    #[test]
    fn test_overloads_and_redefinitions_yield_one_node() {
        let temp_dir = TempDir::new().unwrap();
        let pkg = temp_dir.path().join("pkg");
        fs::create_dir(&pkg).unwrap();
        fs::write(
            pkg.join("m.py"),
            r#"
from typing import overload

@overload
def f(x: int) -> int: ...

@overload
def f(x: str) -> str: ...

def f(x):
    """Identity."""
    return x

class C:
    def go(self):
        pass

    def go(self, x):
        pass
"#,
        )
        .unwrap();

        let tree = scribe().doctree(&pkg).unwrap();

        assert_eq!(hrefs(&tree), vec!["/", "/m", "/m/C", "/m/f"]);
        let f = tree.find("/m/f").unwrap();
        assert_eq!(f.metadata.signature.as_deref(), Some("(x)"));
        let methods: Vec<(&str, &str)> = tree
            .find("/m/C")
            .unwrap()
            .methods()
            .iter()
            .map(|m| (m.name.as_deref().unwrap(), m.signature.as_deref().unwrap()))
            .collect();
        assert_eq!(methods, vec![("go", "(self, x)")]);
    }

    #[test]
    fn test_doctest_comments_do_not_abort_the_run() {
        let temp_dir = TempDir::new().unwrap();
        let pkg = temp_dir.path().join("pkg");
        fs::create_dir(&pkg).unwrap();
        fs::write(
            pkg.join("m.py"),
            "def f():\n    \"\"\"Do it.\n\n    >>> # set up\n    >>> f()\n    \"\"\"\n",
        )
        .unwrap();

        let tree = scribe().doctree(&pkg).unwrap();

        let doc = tree.find("/m/f").unwrap().metadata.doc.as_ref().unwrap();
        assert!(doc[DESCRIPTION].contains("<p>Do it.</p>"));
    }

    #[test]
    fn test_grouped_hrefs_keep_paths() {
        let (_guard, pkg) = sample_package();
        let tree = Scribe::new(ScribeConfig {
            separate_classes: false,
            separate_functions: false,
            ..Default::default()
        })
        .doctree(&pkg)
        .unwrap();

        let module = &tree.children()[0];
        assert_eq!(module.children()[0].href, "/mod/classes/Thing");
        assert_eq!(module.children()[0].path, "pkg.mod.Thing");
        assert_eq!(module.children()[1].href, "/mod/routines/run");
        assert_eq!(module.children()[1].path, "pkg.mod.run");
    }

    #[test]
    fn test_hidden_and_non_routine_members_are_excluded() {
        let temp_dir = TempDir::new().unwrap();
        let pkg = temp_dir.path().join("pkg");
        fs::create_dir(&pkg).unwrap();
        fs::write(
            pkg.join("shapes.py"),
            r#"
from typing import List

Alias = list[int]
LIMIT = 10


class Shape:
    def __repr__(self):
        return "Shape"

    def _hidden(self):
        pass

    @property
    def area(self):
        return 0

    @classmethod
    def make(cls):
        return cls()

    def draw(self):
        pass
"#,
        )
        .unwrap();

        let tree = scribe().doctree(&pkg).unwrap();
        let module = &tree.children()[0];

        let children: Vec<&str> = module.children().iter().filter_map(|c| c.name()).collect();
        assert_eq!(children, vec!["Shape"], "Aliases and variables are not documented");

        let methods: Vec<&str> = module.children()[0]
            .methods()
            .iter()
            .filter_map(|m| m.name.as_deref())
            .collect();
        assert_eq!(methods, vec!["draw"]);
    }

    #[test]
    fn test_description_is_always_present() {
        let (_guard, pkg) = sample_package();
        fs::write(pkg.join("bare.py"), "def f():\n    pass\n").unwrap();

        let tree = scribe().doctree(&pkg).unwrap();
        for node in tree.walk() {
            if node.node_type == NodeType::Folder {
                assert!(node.metadata.doc.is_none());
                continue;
            }
            let doc = node.metadata.doc.as_ref().unwrap();
            assert!(doc.contains_key(DESCRIPTION), "{} lacks a description", node.href);
        }

        let module = tree.find("/mod").unwrap();
        assert!(module.metadata.doc.as_ref().unwrap()[DESCRIPTION]
            .contains("<div class=\"synopse\"><p>Module summary.</p></div>,<p>More about the module.</p>"));
    }

    #[test]
    fn test_ignore_patterns_and_skipped_directories() {
        let (_guard, pkg) = sample_package();
        fs::create_dir(pkg.join("tests")).unwrap();
        fs::write(pkg.join("tests/test_mod.py"), "def test_x():\n    pass\n").unwrap();
        fs::create_dir(pkg.join("__pycache__")).unwrap();
        fs::write(pkg.join("__pycache__/mod.py"), "def cached():\n    pass\n").unwrap();
        fs::create_dir(pkg.join(".venv")).unwrap();
        fs::write(pkg.join(".venv/site.py"), "def site():\n    pass\n").unwrap();
        fs::write(pkg.join("gen_pb2.py"), "def gen():\n    pass\n").unwrap();
        fs::write(pkg.join("notes.txt"), "not python").unwrap();
        fs::write(pkg.join(".transcribeignore"), "# generated\n*_pb2.py\n").unwrap();

        let tree = Scribe::new(ScribeConfig {
            exclude: vec!["tests/".to_string()],
            ..Default::default()
        })
        .doctree(&pkg)
        .unwrap();

        assert_eq!(hrefs(&tree), vec!["/", "/mod", "/mod/Thing", "/mod/run"]);
    }

    #[test]
    fn test_load_error_aborts_the_run() {
        let (guard, pkg) = sample_package();
        fs::write(pkg.join("broken.py"), "def broken(:\n").unwrap();
        let out = guard.path().join("tree.json");

        let err = scribe().transcribe(&pkg, &out).unwrap_err();

        match err {
            ScribeError::Load { path, cause } => {
                assert!(path.ends_with("broken.py"));
                assert!(cause.contains("SyntaxError"), "Unexpected cause: {}", cause);
            }
            other => panic!("Expected load error, got {:?}", other),
        }
        assert!(!out.exists(), "No partial tree is written");
    }

    #[test]
    fn test_document_rejects_unsupported_objects() {
        let module = ExtractorManager::new()
            .extract_module("consts.py", "LIMIT = 10\n", "consts")
            .unwrap();
        let variable = module.member("LIMIT").unwrap();

        let err = scribe().document(variable, "/", "pkg").unwrap_err();
        assert_eq!(
            err.to_string(),
            "don't know how to document object LIMIT of type int"
        );
    }

    #[test]
    fn test_sample_package_fixture() {
        let fixture = Path::new(env!("CARGO_MANIFEST_DIR")).join("test_samples/geometry");
        let tree = scribe().doctree(&fixture).unwrap();

        assert_eq!(tree.path, "geometry");
        let shapes = tree.find("/shapes").unwrap();
        assert_eq!(shapes.metadata.version.as_deref(), Some("1.7"));
        assert_eq!(shapes.metadata.date.as_deref(), Some("2019-03-01"));

        let circle = tree.find("/shapes/Circle").unwrap();
        assert_eq!(circle.metadata.signature.as_deref(), Some("(radius: float)"));
        let doc = circle.metadata.doc.as_ref().unwrap();
        assert!(doc.contains_key("parameters"), "Sections: {:?}", doc.keys());

        let scale = tree.find("/transforms/scale").unwrap();
        assert_eq!(scale.path, "geometry.transforms.scale");
        assert!(tree.find("/shapes/Alias").is_none());
    }
}
