//! Demo application rendered by `settle render`
//!
//! A comment thread whose replies are fetched lazily: every render walks the
//! replies that are already cached and dispatches a fetch for each branch
//! that is still missing. Each fetch reveals one more level of the tree, so a
//! thread of depth D needs D rounds of async work and D+1 renders.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;
use std::time::Duration;

use tracing::debug;

use crate::domain::models::{Action, AsyncHandle};
use crate::domain::ports::StateContainer;
use crate::services::WaitStore;

/// Id of the thread's opening post
pub const ROOT_ID: &str = "root";

const REPLIES_PER_COMMENT: u32 = 2;

/// A single comment in the thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: String,
    pub level: u32,
    pub body: String,
}

#[derive(Debug, Clone)]
pub enum ThreadAction {
    /// Load the direct replies of `parent`
    FetchReplies {
        parent: String,
        handle: AsyncHandle<Vec<Comment>, String>,
    },
}

impl Action for ThreadAction {
    type Output = Vec<Comment>;
    type Error = String;

    fn action_type(&self) -> &str {
        match self {
            Self::FetchReplies { .. } => "FETCH_REPLIES",
        }
    }

    fn async_payload(&self) -> Option<AsyncHandle<Vec<Comment>, String>> {
        match self {
            Self::FetchReplies { handle, .. } => Some(handle.clone()),
        }
    }
}

/// Host state: which branches have a fetch in flight or settled
#[derive(Debug, Default)]
pub struct ThreadState {
    pub requested: BTreeSet<String>,
}

pub fn thread_reducer(state: &mut ThreadState, action: &ThreadAction) {
    match action {
        ThreadAction::FetchReplies { parent, .. } => {
            state.requested.insert(parent.clone());
        }
    }
}

/// Settled fetch results keyed by parent id, shared between fetches and renders
pub type ReplyCache = Rc<RefCell<BTreeMap<String, Result<Vec<Comment>, String>>>>;

pub type ThreadStore = WaitStore<ThreadState, ThreadAction>;

/// Simulated backend serving a binary reply tree
#[derive(Debug, Clone)]
pub struct CommentSource {
    depth: u32,
    latency: Duration,
    fail_at: Option<u32>,
    cache: ReplyCache,
}

impl CommentSource {
    /// A tree `depth` levels deep whose fetches take `latency` each.
    ///
    /// With `fail_at = Some(k)`, every fetch for level `k` rejects.
    pub fn new(depth: u32, latency: Duration, fail_at: Option<u32>) -> Self {
        Self {
            depth,
            latency,
            fail_at,
            cache: Rc::default(),
        }
    }

    pub const fn depth(&self) -> u32 {
        self.depth
    }

    pub fn cache(&self) -> &ReplyCache {
        &self.cache
    }

    /// Start fetching the replies of `parent`, which sits at `level`
    pub fn fetch_replies(&self, parent: &str, level: u32) -> AsyncHandle<Vec<Comment>, String> {
        let parent = parent.to_string();
        let cache = Rc::clone(&self.cache);
        let latency = self.latency;
        let child_level = level + 1;
        let fails = self.fail_at == Some(child_level);
        let depth = self.depth;

        AsyncHandle::new(async move {
            tokio::time::sleep(latency).await;
            let result = if fails {
                Err(format!("replies to {parent} are unavailable"))
            } else {
                Ok(replies_of(&parent, child_level, depth))
            };
            debug!(parent = %parent, ok = result.is_ok(), "fetch settled");
            cache.borrow_mut().insert(parent, result.clone());
            result
        })
    }
}

fn replies_of(parent: &str, level: u32, depth: u32) -> Vec<Comment> {
    if level > depth {
        return Vec::new();
    }

    (1..=REPLIES_PER_COMMENT)
        .map(|n| {
            let id = if parent == ROOT_ID {
                n.to_string()
            } else {
                format!("{parent}.{n}")
            };
            Comment {
                body: format!("Reply {id}"),
                id,
                level,
            }
        })
        .collect()
}

/// Render the thread page from what is cached, dispatching fetches for gaps
pub fn render_page(store: &mut ThreadStore, source: &CommentSource, title: &str) -> String {
    let mut page = String::new();
    let mut missing = Vec::new();

    page.push_str("<article>\n");
    page.push_str(&format!("  <h1>{title}</h1>\n"));
    {
        let cache = source.cache.borrow();
        let mut walk = Walk {
            out: &mut page,
            cache: &cache,
            requested: &store.state().requested,
            depth: source.depth,
            missing: &mut missing,
        };
        walk.replies(ROOT_ID, 0, 1);
    }
    page.push_str("</article>");

    for (parent, level) in missing {
        let handle = source.fetch_replies(&parent, level);
        store.dispatch(ThreadAction::FetchReplies { parent, handle });
    }

    page
}

struct Walk<'a> {
    out: &'a mut String,
    cache: &'a BTreeMap<String, Result<Vec<Comment>, String>>,
    requested: &'a BTreeSet<String>,
    depth: u32,
    missing: &'a mut Vec<(String, u32)>,
}

impl Walk<'_> {
    fn line(&mut self, indent: usize, text: &str) {
        self.out.push_str(&"  ".repeat(indent));
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn replies(&mut self, parent: &str, level: u32, indent: usize) {
        if level >= self.depth {
            return;
        }

        match self.cache.get(parent) {
            Some(Ok(children)) => {
                if children.is_empty() {
                    return;
                }
                self.line(indent, "<ul>");
                for child in children {
                    self.line(indent + 1, &format!("<li id=\"c-{}\">{}", child.id, child.body));
                    self.replies(&child.id, child.level, indent + 2);
                    self.line(indent + 1, "</li>");
                }
                self.line(indent, "</ul>");
            }
            Some(Err(error)) => {
                self.line(indent, &format!("<p class=\"error\">{error}</p>"));
            }
            None => {
                self.line(indent, "<p class=\"loading\">Loading replies...</p>");
                if !self.requested.contains(parent) {
                    self.missing.push((parent.to_string(), level));
                }
            }
        }
    }
}
