//! Multi-word command dispatch.
//!
//! A [`Router`] maps words such as `players update` to a leaf action and can
//! render every reachable leaf as an aligned usage listing.

use std::collections::BTreeMap;

/// Flags start with this marker; command words never do.
pub const FLAG_MARKER: char = '-';

#[derive(Debug, Clone)]
pub enum Node<A> {
    Branch {
        children: BTreeMap<String, Node<A>>,
        /// When set, the listing shows this line instead of descending.
        usage: Option<String>,
    },
    Leaf {
        action: A,
        usage: Option<String>,
    },
}

impl<A> Node<A> {
    pub fn leaf(action: A) -> Self {
        Node::Leaf {
            action,
            usage: None,
        }
    }

    pub fn branch<I, K>(children: I) -> Self
    where
        I: IntoIterator<Item = (K, Node<A>)>,
        K: Into<String>,
    {
        Node::Branch {
            children: children.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            usage: None,
        }
    }

    pub fn with_usage(mut self, text: impl Into<String>) -> Self {
        match &mut self {
            Node::Branch { usage, .. } | Node::Leaf { usage, .. } => *usage = Some(text.into()),
        }
        self
    }

    pub fn usage(&self) -> Option<&str> {
        match self {
            Node::Branch { usage, .. } | Node::Leaf { usage, .. } => usage.as_deref(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Router<A> {
    root: BTreeMap<String, Node<A>>,
}

impl<A> Router<A> {
    pub fn new<I, K>(routes: I) -> Self
    where
        I: IntoIterator<Item = (K, Node<A>)>,
        K: Into<String>,
    {
        Self {
            root: routes.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Finds the leaf addressed by exactly `words`. Returns `None` for an
    /// empty path, an unknown word, a path that stops at a branch, or one
    /// that continues past a leaf.
    pub fn resolve<S: AsRef<str>>(&self, words: &[S]) -> Option<&A> {
        lookup(&self.root, words)
    }

    /// One line per listed node: the space-joined path padded to the widest
    /// path, then its usage text.
    pub fn usage(&self) -> String {
        let mut lines = Vec::new();
        collect_usage(&self.root, &mut Vec::new(), &mut lines);
        align(&lines)
    }
}

fn lookup<'a, A, S: AsRef<str>>(
    nodes: &'a BTreeMap<String, Node<A>>,
    words: &[S],
) -> Option<&'a A> {
    let (first, rest) = words.split_first()?;
    match (nodes.get(first.as_ref())?, rest.is_empty()) {
        (Node::Leaf { action, .. }, true) => Some(action),
        (Node::Branch { children, .. }, false) => lookup(children, rest),
        _ => None,
    }
}

fn collect_usage<'a, A>(
    nodes: &'a BTreeMap<String, Node<A>>,
    path: &mut Vec<&'a str>,
    lines: &mut Vec<(String, &'a str)>,
) {
    for (word, node) in nodes {
        path.push(word);
        match (node, node.usage()) {
            (_, Some(usage)) => lines.push((path.join(" "), usage)),
            (Node::Branch { children, .. }, None) => collect_usage(children, path, lines),
            (Node::Leaf { .. }, None) => {}
        }
        path.pop();
    }
}

fn align(lines: &[(String, &str)]) -> String {
    let width = lines
        .iter()
        .map(|(path, _)| path.chars().count())
        .max()
        .unwrap_or(0);
    lines
        .iter()
        .map(|(path, usage)| format!("{path:<width$}  {usage}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Splits raw arguments into the leading command words and the remaining
/// flags, at the first token that starts with [`FLAG_MARKER`].
pub fn split_invocation<S: AsRef<str>>(args: &[S]) -> (&[S], &[S]) {
    let at = args
        .iter()
        .position(|a| a.as_ref().starts_with(FLAG_MARKER))
        .unwrap_or(args.len());
    args.split_at(at)
}
