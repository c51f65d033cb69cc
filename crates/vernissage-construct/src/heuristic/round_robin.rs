// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Round-robin construction with a run cap and a tag-index fallback.
//!
//! Every group owns a queue of its members. At each step the heuristic:
//!
//! 1. Finds the next group by walking the ring of non-exhausted groups,
//!    starting at the group of the last placed slide. The previous group is
//!    skipped once it has produced `max_run` consecutive slides.
//! 2. Probes up to `group_probe` unused entries from the front of that queue
//!    and scores them against the last placed slide. Used entries are dropped
//!    on sight; probed entries go back to the end of the queue.
//! 3. If the probe found nothing or only zero scores, asks the
//!    [`TagInvertedIndex`] for candidates sharing a tag with the last slide and
//!    takes the best one if it scores strictly higher. Candidates from a capped
//!    group are ignored.
//! 4. If neither source produced a slide, drains the first non-empty queue in
//!    ring order, ignoring the run cap.
//!
//! Exhausted groups are unlinked from the ring in `O(1)`, so finding the next
//! group does not rescan dead queues.

use crate::{
    error::ConstructionError,
    grouping::{GroupKeyPolicy, Groups},
    heuristic::ConstructionHeuristic,
    tag_index::TagInvertedIndex,
};
use fixedbitset::FixedBitSet;
use rand::Rng;
use std::collections::VecDeque;
use vernissage_model::{index::SlideIndex, model::Model, tour::Tour};

pub const DEFAULT_MAX_RUN: usize = 3;
pub const DEFAULT_GROUP_PROBE: usize = 32;
pub const DEFAULT_TAG_CANDIDATES: usize = 64;
pub const DEFAULT_TAG_PER_TAG: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRobinConstruction {
    policy: GroupKeyPolicy,
    max_run: usize,
    group_probe: usize,
    tag_candidates: usize,
    tag_per_tag: usize,
}

impl Default for RoundRobinConstruction {
    fn default() -> Self {
        Self {
            policy: GroupKeyPolicy::default(),
            max_run: DEFAULT_MAX_RUN,
            group_probe: DEFAULT_GROUP_PROBE,
            tag_candidates: DEFAULT_TAG_CANDIDATES,
            tag_per_tag: DEFAULT_TAG_PER_TAG,
        }
    }
}

impl RoundRobinConstruction {
    #[inline]
    pub fn new(policy: GroupKeyPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Sets the maximum number of consecutive slides drawn from one group.
    /// Values below 1 are treated as 1.
    #[inline]
    pub fn with_max_run(mut self, max_run: usize) -> Self {
        self.max_run = max_run.max(1);
        self
    }

    /// Sets the number of queue entries scored per step.
    /// Values below 1 are treated as 1.
    #[inline]
    pub fn with_group_probe(mut self, group_probe: usize) -> Self {
        self.group_probe = group_probe.max(1);
        self
    }

    /// Sets the total and per-tag candidate limits of the tag-index fallback.
    /// A zero limit disables the fallback.
    #[inline]
    pub fn with_tag_candidates(mut self, limit: usize, per_tag: usize) -> Self {
        self.tag_candidates = limit;
        self.tag_per_tag = per_tag;
        self
    }

    #[inline]
    pub fn max_run(&self) -> usize {
        self.max_run
    }

    #[inline]
    pub fn group_probe(&self) -> usize {
        self.group_probe
    }
}

impl ConstructionHeuristic for RoundRobinConstruction {
    fn name(&self) -> &str {
        "RoundRobinConstruction"
    }

    fn construct<R>(&mut self, model: &Model, rng: &mut R) -> Result<Tour, ConstructionError>
    where
        R: Rng + ?Sized,
    {
        RoundRobinState::new(*self, model, rng).run()
    }
}

/// Circular doubly linked list over group positions.
///
/// A removed node keeps its `next` pointer, so walking forward from a dead node
/// always reaches a live one as long as the ring is not empty.
#[derive(Debug, Clone)]
struct LiveRing {
    next: Vec<usize>,
    prev: Vec<usize>,
    alive: FixedBitSet,
    len: usize,
}

impl LiveRing {
    fn new(len: usize) -> Self {
        let mut alive = FixedBitSet::with_capacity(len);
        alive.insert_range(..);
        Self {
            next: (0..len).map(|i| (i + 1) % len).collect(),
            prev: (0..len).map(|i| (i + len - 1) % len).collect(),
            alive,
            len,
        }
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn remove(&mut self, node: usize) {
        if !self.alive.contains(node) {
            return;
        }
        self.alive.set(node, false);
        self.len -= 1;
        let (prev, next) = (self.prev[node], self.next[node]);
        self.next[prev] = next;
        self.prev[next] = prev;
    }

    /// The first live node at or after `node`.
    fn first_from(&self, node: usize) -> Option<usize> {
        if self.is_empty() || node >= self.next.len() {
            return None;
        }
        let mut current = node;
        while !self.alive.contains(current) {
            current = self.next[current];
        }
        Some(current)
    }

    /// The first live node strictly after `node`.
    #[inline]
    fn after(&self, node: usize) -> Option<usize> {
        self.first_from(*self.next.get(node)?)
    }
}

/// Where a placed slide came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Probe,
    TagIndex,
    Drain,
}

struct RoundRobinState<'a> {
    settings: RoundRobinConstruction,
    model: &'a Model,
    groups: Groups,
    queues: Vec<VecDeque<SlideIndex>>,
    ring: LiveRing,
    index: TagInvertedIndex,
    used: FixedBitSet,
    order: Vec<SlideIndex>,
    cursor: usize,
    previous: Option<usize>,
    run_length: usize,
    probe: Vec<SlideIndex>,
    candidates: Vec<SlideIndex>,
}

impl<'a> RoundRobinState<'a> {
    fn new<R>(settings: RoundRobinConstruction, model: &'a Model, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let groups = Groups::build(model, settings.policy, rng);
        let index = TagInvertedIndex::build(model, rng);
        let queues: Vec<VecDeque<SlideIndex>> = (0..groups.num_groups())
            .map(|g| groups.members(g).iter().copied().collect())
            .collect();

        Self {
            settings,
            model,
            ring: LiveRing::new(queues.len()),
            queues,
            groups,
            index,
            used: FixedBitSet::with_capacity(model.num_slides()),
            order: Vec::with_capacity(model.num_slides()),
            cursor: 0,
            previous: None,
            run_length: 0,
            probe: Vec::with_capacity(settings.group_probe),
            candidates: Vec::with_capacity(settings.tag_candidates),
        }
    }

    fn run(mut self) -> Result<Tour, ConstructionError> {
        let total = self.model.num_slides();
        if total == 0 {
            return Ok(Tour::default());
        }

        if let Some(first) = self.drain_any() {
            self.place(first);
        }

        let mut probe_hits = 0usize;
        let mut tag_hits = 0usize;
        let mut drains = 0usize;
        while let Some(&last) = self.order.last() {
            if self.order.len() == total {
                break;
            }
            let Some((next, source)) = self.step(last) else {
                break;
            };
            match source {
                Source::Probe => probe_hits += 1,
                Source::TagIndex => tag_hits += 1,
                Source::Drain => drains += 1,
            }
            self.place(next);
        }

        if self.order.len() < total {
            tracing::error!(
                placed = self.order.len(),
                total,
                live_groups = self.ring.len,
                "round-robin construction stalled with slides left unplaced"
            );
            return Err(ConstructionError::Stalled {
                placed: self.order.len(),
                total,
            });
        }

        tracing::debug!(
            slides = total,
            groups = self.groups.num_groups(),
            probe_hits,
            tag_hits,
            drains,
            "round-robin construction finished"
        );
        Ok(Tour::new(self.order))
    }

    /// Chooses the slide to follow `last`.
    ///
    /// The probe of the next eligible group wins unless it scored zero or found
    /// nothing; then a strictly better tag-index candidate takes over. With
    /// neither, any remaining slide is drained.
    fn step(&mut self, last: SlideIndex) -> Option<(SlideIndex, Source)> {
        let probed = self.next_group().and_then(|g| self.probe_group(g, last));
        if probed.is_none_or(|(_, score)| score == 0) {
            if let Some((slide, _)) = self.tag_fallback(last, probed.map(|(_, s)| s)) {
                return Some((slide, Source::TagIndex));
            }
        }
        match probed {
            Some((slide, _)) => Some((slide, Source::Probe)),
            None => self.drain_any().map(|slide| (slide, Source::Drain)),
        }
    }

    #[inline]
    fn is_capped(&self, group: usize) -> bool {
        self.previous == Some(group) && self.run_length >= self.settings.max_run
    }

    /// Drops used entries from the front of a queue. Returns `false` and
    /// unlinks the group when the queue runs empty.
    fn refresh(&mut self, group: usize) -> bool {
        let queue = &mut self.queues[group];
        while let Some(&slide) = queue.front() {
            if !self.used.contains(slide.get()) {
                return true;
            }
            queue.pop_front();
        }
        self.ring.remove(group);
        false
    }

    fn next_group(&mut self) -> Option<usize> {
        let mut group = self.ring.first_from(self.cursor)?;
        let mut skipped_capped = false;
        loop {
            if self.refresh(group) {
                if !self.is_capped(group) {
                    return Some(group);
                }
                if skipped_capped {
                    return None;
                }
                skipped_capped = true;
            }
            group = self.ring.after(group)?;
        }
    }

    /// Scores up to `group_probe` unused queue entries against `last`.
    /// Ties go to the entry closest to the front.
    fn probe_group(&mut self, group: usize, last: SlideIndex) -> Option<(SlideIndex, u32)> {
        let model = self.model;
        let queue = &mut self.queues[group];
        self.probe.clear();
        while self.probe.len() < self.settings.group_probe {
            let Some(slide) = queue.pop_front() else {
                break;
            };
            if !self.used.contains(slide.get()) {
                self.probe.push(slide);
            }
        }
        queue.extend(self.probe.iter().copied());

        let mut best: Option<(SlideIndex, u32)> = None;
        for &slide in &self.probe {
            let score = model.slide_score(last, slide);
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((slide, score));
            }
        }
        best
    }

    /// Best tag-index candidate scoring strictly above `threshold`, if any.
    fn tag_fallback(&mut self, last: SlideIndex, threshold: Option<u32>) -> Option<(SlideIndex, u32)> {
        let model = self.model;
        self.index.pick(
            model.slide(last).tags(),
            &self.used,
            self.settings.tag_candidates,
            self.settings.tag_per_tag,
            &mut self.candidates,
        );

        let mut best: Option<(SlideIndex, u32)> = None;
        for &slide in &self.candidates {
            if self.is_capped(self.groups.group_of(slide)) {
                continue;
            }
            let score = model.slide_score(last, slide);
            let beats_threshold = threshold.is_none_or(|t| score > t);
            if beats_threshold && best.is_none_or(|(_, s)| score > s) {
                best = Some((slide, score));
            }
        }
        best
    }

    /// Pops the first unused slide of the first non-empty queue in ring order.
    fn drain_any(&mut self) -> Option<SlideIndex> {
        loop {
            let group = self.ring.first_from(self.cursor)?;
            while let Some(slide) = self.queues[group].pop_front() {
                if !self.used.contains(slide.get()) {
                    return Some(slide);
                }
            }
            self.ring.remove(group);
            self.cursor = group;
        }
    }

    fn place(&mut self, slide: SlideIndex) {
        debug_assert!(!self.used.contains(slide.get()), "{} placed twice", slide);
        self.used.insert(slide.get());
        self.order.push(slide);

        let group = self.groups.group_of(slide);
        if self.previous == Some(group) {
            self.run_length += 1;
        } else {
            self.previous = Some(group);
            self.run_length = 1;
        }
        self.cursor = group;
    }
}
