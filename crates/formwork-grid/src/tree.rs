#![forbid(unsafe_code)]

//! Tree forms: a titled, collapsible tree of keyed nodes.
//!
//! Callers expose their hierarchy through [`TreeData`]; rendering snapshots
//! it into [`TreeNode`]s and stamps a recursive template that renders each
//! node with its children nested below it.

use std::rc::Rc;
use std::sync::Arc;

use formwork_core::{RenderError, Template, TemplateExecutor, TemplateSource};
use serde::Serialize;

use crate::cache::TemplateCache;
use crate::events::{GridCallbacks, GridEvent, RowClick};
use crate::synth::{Header, RenderOptions, TreeLayout};

/// One node of a rendered tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TreeNode {
    pub key: String,
    pub label: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, this one included.
    #[must_use]
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::count).sum::<usize>()
    }
}

/// A hierarchy that can be shown in a [`TreeForm`].
pub trait TreeData {
    /// Key reported by a click on this node.
    fn key(&self) -> String;

    fn label(&self) -> String;

    /// Visit the direct children in display order.
    fn for_each_child(&self, _visit: &mut dyn FnMut(&dyn TreeData)) {}

    /// Snapshot this subtree.
    fn to_node(&self) -> TreeNode {
        let mut children = Vec::new();
        self.for_each_child(&mut |child: &dyn TreeData| children.push(child.to_node()));
        TreeNode {
            key: self.key(),
            label: self.label(),
            children,
        }
    }
}

impl TreeData for TreeNode {
    fn key(&self) -> String {
        self.key.clone()
    }

    fn label(&self) -> String {
        self.label.clone()
    }

    fn for_each_child(&self, visit: &mut dyn FnMut(&dyn TreeData)) {
        for child in &self.children {
            visit(child);
        }
    }

    fn to_node(&self) -> TreeNode {
        self.clone()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TreeForm {
    title: String,
    icon: String,
    id: i64,
    callbacks: GridCallbacks,
}

impl TreeForm {
    #[must_use]
    pub fn new(icon: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon: icon.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    #[must_use]
    pub fn callbacks(&self) -> &GridCallbacks {
        &self.callbacks
    }

    pub fn row_event(&mut self, cb: impl Fn(&str) + 'static) -> &mut Self {
        self.callbacks.row = Some(Rc::new(cb));
        self
    }

    pub fn cancel_event(&mut self, cb: impl Fn() + 'static) -> &mut Self {
        self.callbacks.cancel = Some(Rc::new(cb));
        self
    }

    pub fn new_row_event(&mut self, cb: impl Fn() + 'static) -> &mut Self {
        self.callbacks.new_row = Some(Rc::new(cb));
        self
    }

    pub fn print_event(&mut self, cb: impl Fn() + 'static) -> &mut Self {
        self.callbacks.print = Some(Rc::new(cb));
        self
    }

    pub fn dispatch(&self, event: &GridEvent) -> bool {
        self.callbacks.dispatch(event)
    }

    /// Resolve a click inside the tree to a node key and raise the row event.
    pub fn click(&self, click: &RowClick) -> Option<String> {
        self.callbacks.click(click)
    }

    fn layout<'a>(&self, name: &'a str) -> TreeLayout<'a> {
        TreeLayout {
            name,
            header: Header {
                titled: !self.title.is_empty() || !self.icon.is_empty(),
                add: self.callbacks.has_new_row(),
                print: self.callbacks.has_print(),
            },
        }
    }

    /// The template for `name`, synthesized when the cache does not hold it.
    pub fn template(&self, name: &str, cache: &TemplateCache, opts: &RenderOptions) -> Arc<Template> {
        if opts.refresh {
            cache.invalidate(name);
        }
        let layout = self.layout(name);
        cache.get_or_build(name, cache.fingerprint(&layout), || layout.source())
    }

    /// Render the trees rooted at `roots` at `target`.
    pub fn render<D, E>(
        &self,
        name: &str,
        target: &str,
        roots: &[D],
        cache: &TemplateCache,
        executor: &mut E,
        opts: &RenderOptions,
    ) -> Result<(), RenderError>
    where
        D: TreeData,
        E: TemplateExecutor + ?Sized,
    {
        let nodes: Vec<TreeNode> = roots.iter().map(TreeData::to_node).collect();
        let _span = tracing::debug_span!(
            "render_tree_form",
            title = %self.title,
            template = name,
            nodes = nodes.iter().map(TreeNode::count).sum::<usize>()
        )
        .entered();
        let template = self.template(name, cache, opts);
        let view = serde_json::to_value(TreeView {
            title: &self.title,
            icon: &self.icon,
            id: self.id,
            data: &nodes,
        })?;
        executor.execute(&template, target, &view)?;
        Ok(())
    }

    /// Render the snapshot of `roots` with the caller's template `name`.
    pub fn render_custom<D, L, E>(
        &self,
        name: &str,
        target: &str,
        roots: &[D],
        loader: &L,
        executor: &mut E,
    ) -> Result<(), RenderError>
    where
        D: TreeData,
        L: TemplateSource + ?Sized,
        E: TemplateExecutor + ?Sized,
    {
        let template = loader.template(name)?;
        let nodes: Vec<TreeNode> = roots.iter().map(TreeData::to_node).collect();
        let data = serde_json::to_value(&nodes)?;
        executor.execute(&template, target, &data)?;
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct TreeView<'a> {
    title: &'a str,
    icon: &'a str,
    #[serde(rename = "ID")]
    id: i64,
    data: &'a [TreeNode],
}
