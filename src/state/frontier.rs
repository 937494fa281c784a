//! The crawl frontier: pending queue, visited set and discovered downloads
//!
//! One `Frontier` exists per crawl run and is owned by the coordinator. An
//! href can be in `pending` or in `visited`, never both, and never twice in
//! `pending`. Visiting is recorded by the coordinator once a fetch attempt has
//! completed, not by [`Frontier::pop`].

use crate::url::Uri;
use std::collections::{HashSet, VecDeque};

#[derive(Debug, Default)]
pub struct Frontier {
    /// Every href a fetch has been issued for
    visited: HashSet<String>,

    /// FIFO queue of URIs awaiting fetch
    pending: VecDeque<Uri>,

    /// Hrefs currently in `pending`
    pending_hrefs: HashSet<String>,

    /// Non-HTML resources in discovery order
    downloads: Vec<Uri>,

    download_hrefs: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a candidate to the pending queue
    ///
    /// Returns false and leaves the frontier untouched if the href is already
    /// visited or pending.
    pub fn enqueue(&mut self, candidate: Uri) -> bool {
        let href = candidate.href();
        if self.pending_hrefs.contains(href) || self.visited.contains(href) {
            return false;
        }

        self.pending_hrefs.insert(href.to_string());
        self.pending.push_back(candidate);
        true
    }

    /// Removes and returns the head of the pending queue
    pub fn pop(&mut self) -> Option<Uri> {
        let next = self.pending.pop_front()?;
        self.pending_hrefs.remove(next.href());
        Some(next)
    }

    pub fn mark_visited(&mut self, href: &str) {
        if !self.visited.contains(href) {
            self.visited.insert(href.to_string());
        }
    }

    /// Records a non-HTML resource, once per href
    ///
    /// Returns true if the download was new.
    pub fn record_download(&mut self, uri: Uri) -> bool {
        if self.download_hrefs.contains(uri.href()) {
            return false;
        }

        self.download_hrefs.insert(uri.href().to_string());
        self.downloads.push(uri);
        true
    }

    /// True when nothing is left to fetch
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn is_visited(&self, href: &str) -> bool {
        self.visited.contains(href)
    }

    pub fn is_pending(&self, href: &str) -> bool {
        self.pending_hrefs.contains(href)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    pub fn downloads(&self) -> &[Uri] {
        &self.downloads
    }

    pub fn into_downloads(self) -> Vec<Uri> {
        self.downloads
    }
}
