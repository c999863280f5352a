//! Bucketed, reference-counted entity storage and the frame passes
//!
//! The manager owns every entity in a generational arena and partitions the
//! population into *buckets* (players, enemies, projectiles, ...). Buckets
//! hold [`EntityId`] handles, never the entities themselves, so a stale
//! handle is detectable instead of dangling.
//!
//! Each bucket slot owns one reference to its entity. The caller that
//! inserted the entity owns one more until it releases it. An entity is
//! dropped exactly when its reference count reaches zero.
//!
//! All traversal passes set a reentrancy flag. Structural calls made while
//! the flag is up are programmer errors: they are reported and degrade to a
//! no-op / `false` return rather than corrupting the tables. This is a
//! same-thread guard, not a lock; the engine is single-threaded.

use slotmap::SlotMap;

use super::{Entity, UpdateContext};
use crate::foundation::math::Rect;
use crate::message::MessageQueue;
use crate::render::RenderFrame;

slotmap::new_key_type! {
    /// Stable generational handle to an entity.
    ///
    /// Holding an id does not keep the entity alive; the reference count
    /// does. An id whose entity has been freed is rejected by every
    /// operation that receives it.
    pub struct EntityId;
}

struct EntityEntry<M> {
    entity: Box<dyn Entity<M>>,
    refs: u32,
}

/// Report a caller bug and degrade to a no-op.
///
/// Breaks in debug builds (outside the test harness), logs and returns
/// `false` otherwise.
fn misuse(msg: &str) -> bool {
    log::error!("{msg}");
    #[cfg(all(debug_assertions, not(test)))]
    panic!("{msg}");
    #[allow(unreachable_code)]
    false
}

/// Arena of entities partitioned into buckets, with update, depth-sorted
/// render, and pairwise collision passes.
///
/// `M` is the game's message type; see [`UpdateContext`].
pub struct EntityManager<M> {
    arena: SlotMap<EntityId, EntityEntry<M>>,
    buckets: Vec<Vec<EntityId>>,
    iterating: bool,
}

impl<M> Default for EntityManager<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> EntityManager<M> {
    /// Create an empty manager with no buckets
    pub fn new() -> Self {
        Self {
            arena: SlotMap::with_key(),
            buckets: Vec::new(),
            iterating: false,
        }
    }

    fn check_unlocked(&self, op: &str) -> bool {
        if self.iterating {
            return misuse(&format!(
                "EntityManager::{op} called during an active traversal; ignored"
            ));
        }
        true
    }

    /// Move an entity into the arena.
    ///
    /// The returned id carries the caller's own reference: pair every
    /// `insert` with a [`EntityManager::release`] once the entity has been
    /// handed to its buckets.
    pub fn insert(&mut self, entity: Box<dyn Entity<M>>) -> EntityId {
        self.arena.insert(EntityEntry { entity, refs: 1 })
    }

    /// Append the entity to `bucket`, taking one reference.
    ///
    /// The bucket table grows on demand: referencing bucket `n` guarantees
    /// at least `n + 1` buckets exist afterwards. Duplicate adds are
    /// permitted and create independent slots, each owning a reference.
    pub fn add_to_bucket(&mut self, id: EntityId, bucket: usize) -> bool {
        let Some(entry) = self.arena.get_mut(id) else {
            return misuse("EntityManager::add_to_bucket called with a stale entity id");
        };
        entry.refs += 1;
        if bucket >= self.buckets.len() {
            self.buckets.resize_with(bucket + 1, Vec::new);
        }
        self.buckets[bucket].push(id);
        true
    }

    /// Remove the first slot holding `id` from `bucket` and give back its
    /// reference. Returns `false` without complaint when the entity is not
    /// in the bucket.
    pub fn remove_from_bucket(&mut self, id: EntityId, bucket: usize) -> bool {
        if !self.check_unlocked("remove_from_bucket") {
            return false;
        }
        if bucket >= self.buckets.len() {
            return misuse("EntityManager::remove_from_bucket called with an invalid bucket");
        }
        let Some(pos) = self.buckets[bucket].iter().position(|&e| e == id) else {
            return false;
        };
        self.buckets[bucket].remove(pos);
        self.release_ref(id);
        true
    }

    /// Remove the first slot holding `id` from any bucket, scanning buckets
    /// in index order and slots in insertion order. Returns `false` without
    /// complaint when no slot holds the entity.
    pub fn remove(&mut self, id: EntityId) -> bool {
        if !self.check_unlocked("remove") {
            return false;
        }
        for bucket in 0..self.buckets.len() {
            if let Some(pos) = self.buckets[bucket].iter().position(|&e| e == id) {
                self.buckets[bucket].remove(pos);
                self.release_ref(id);
                return true;
            }
        }
        false
    }

    /// Release every reference held by `bucket` and clear it
    pub fn remove_all_in(&mut self, bucket: usize) -> bool {
        if !self.check_unlocked("remove_all_in") {
            return false;
        }
        if bucket >= self.buckets.len() {
            return misuse("EntityManager::remove_all_in called with an invalid bucket");
        }
        // The lock brackets the release loop defensively.
        self.iterating = true;
        let ids = std::mem::take(&mut self.buckets[bucket]);
        for id in ids {
            self.release_ref(id);
        }
        self.iterating = false;
        true
    }

    /// Release every reference in every bucket and collapse the bucket table
    pub fn remove_all(&mut self) -> bool {
        if !self.check_unlocked("remove_all") {
            return false;
        }
        self.iterating = true;
        for bucket in 0..self.buckets.len() {
            let ids = std::mem::take(&mut self.buckets[bucket]);
            for id in ids {
                self.release_ref(id);
            }
        }
        self.iterating = false;
        self.buckets.clear();
        true
    }

    /// Give back an externally held reference (typically the one returned by
    /// [`EntityManager::insert`])
    pub fn release(&mut self, id: EntityId) -> bool {
        if !self.check_unlocked("release") {
            return false;
        }
        self.release_ref(id)
    }

    fn release_ref(&mut self, id: EntityId) -> bool {
        let Some(entry) = self.arena.get_mut(id) else {
            return misuse("EntityManager::release called with a stale entity id");
        };
        entry.refs -= 1;
        if entry.refs == 0 {
            self.arena.remove(id);
        }
        true
    }

    /// Update every entity, buckets in index order, slots in insertion
    /// order. Locked: entities request structural changes through
    /// `ctx.messages`, never directly.
    pub fn update_all(&mut self, ctx: &mut UpdateContext<'_, M>) -> bool {
        if !self.check_unlocked("update_all") {
            return false;
        }
        self.iterating = true;
        let Self { arena, buckets, .. } = self;
        for bucket in buckets.iter() {
            for &id in bucket {
                if let Some(entry) = arena.get_mut(id) {
                    entry.entity.update(id, ctx);
                }
            }
        }
        self.iterating = false;
        true
    }

    /// Render every entity in ascending depth order, ignoring bucket
    /// boundaries.
    ///
    /// The sort is stable: entities with equal depth keep their
    /// bucket-then-insertion order. Collection happens under the lock; the
    /// render calls themselves run after it is released.
    pub fn render_all(&mut self, frame: &mut RenderFrame<'_>) -> bool {
        if !self.check_unlocked("render_all") {
            return false;
        }
        self.iterating = true;
        let mut queue: Vec<(EntityId, f32)> = Vec::with_capacity(self.arena.len());
        for bucket in &self.buckets {
            for &id in bucket {
                if let Some(entry) = self.arena.get(id) {
                    queue.push((id, entry.entity.depth()));
                }
            }
        }
        self.iterating = false;

        queue.sort_by(|a, b| a.1.total_cmp(&b.1));

        for (id, _) in queue {
            if let Some(entry) = self.arena.get(id) {
                entry.entity.render(frame);
            }
        }
        true
    }

    /// Pairwise rectangle collision between two buckets.
    ///
    /// Every unordered pair of distinct, non-empty-rect, intersecting
    /// entities receives one `handle_collision` callback on each
    /// participant. When the buckets differ, the smaller one drives the
    /// outer loop. Unknown or empty buckets are quietly skipped.
    pub fn check_collisions(
        &mut self,
        bucket_a: usize,
        bucket_b: usize,
        messages: &mut MessageQueue<M>,
    ) -> bool {
        if !self.check_unlocked("check_collisions") {
            return false;
        }
        if bucket_a >= self.buckets.len()
            || bucket_b >= self.buckets.len()
            || self.buckets[bucket_a].is_empty()
            || self.buckets[bucket_b].is_empty()
        {
            return true;
        }

        self.iterating = true;
        if bucket_a == bucket_b {
            self.collide_within(bucket_a, messages);
        } else {
            self.collide_between(bucket_a, bucket_b, messages);
        }
        self.iterating = false;
        true
    }

    /// Triangular pairing over one bucket so no pair is visited twice
    fn collide_within(&mut self, bucket: usize, messages: &mut MessageQueue<M>) {
        let ids = self.buckets[bucket].clone();
        for i in 0..ids.len().saturating_sub(1) {
            if self.entity_rect(ids[i]).map_or(true, |r| r.is_empty()) {
                continue;
            }
            for j in (i + 1)..ids.len() {
                if ids[i] == ids[j] {
                    continue;
                }
                self.collide_pair(ids[i], ids[j], messages);
            }
        }
    }

    fn collide_between(&mut self, bucket_a: usize, bucket_b: usize, messages: &mut MessageQueue<M>) {
        let mut outer = self.buckets[bucket_a].clone();
        let mut inner = self.buckets[bucket_b].clone();
        // The smaller bucket drives the outer loop to minimize comparisons.
        if inner.len() < outer.len() {
            std::mem::swap(&mut outer, &mut inner);
        }
        for &first in &outer {
            if self.entity_rect(first).map_or(true, |r| r.is_empty()) {
                continue;
            }
            for &second in &inner {
                if first == second {
                    continue;
                }
                self.collide_pair(first, second, messages);
            }
        }
    }

    fn collide_pair(&mut self, first: EntityId, second: EntityId, messages: &mut MessageQueue<M>) {
        // Fresh rectangles: an earlier callback this pass may have moved
        // either participant.
        let (Some(ra), Some(rb)) = (self.entity_rect(first), self.entity_rect(second)) else {
            return;
        };
        if !ra.intersects(&rb) {
            return;
        }
        let Some([ea, eb]) = self.arena.get_disjoint_mut([first, second]) else {
            return;
        };
        ea.entity.handle_collision(first, eb.entity.as_ref(), messages);
        eb.entity.handle_collision(second, ea.entity.as_ref(), messages);
    }

    fn entity_rect(&self, id: EntityId) -> Option<Rect> {
        self.arena.get(id).map(|e| e.entity.rect())
    }

    /// Shared access to an entity by id
    pub fn get(&self, id: EntityId) -> Option<&dyn Entity<M>> {
        self.arena.get(id).map(|e| e.entity.as_ref())
    }

    /// Exclusive access to an entity by id
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut (dyn Entity<M> + 'static)> {
        self.arena.get_mut(id).map(|e| e.entity.as_mut())
    }

    /// Whether the entity is still alive
    pub fn contains(&self, id: EntityId) -> bool {
        self.arena.contains_key(id)
    }

    /// Current reference count of an entity, `None` if freed
    pub fn ref_count(&self, id: EntityId) -> Option<u32> {
        self.arena.get(id).map(|e| e.refs)
    }

    /// Number of live entities in the arena
    pub fn entity_count(&self) -> usize {
        self.arena.len()
    }

    /// Number of buckets the table has grown to
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of slots in `bucket` (0 for unknown buckets)
    pub fn bucket_len(&self, bucket: usize) -> usize {
        self.buckets.get(bucket).map_or(0, Vec::len)
    }

    /// Whether a traversal pass is currently running
    pub fn is_iterating(&self) -> bool {
        self.iterating
    }
}
