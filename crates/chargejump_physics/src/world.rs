//! Collision world with spatial-hash broadphase and swept moves

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::body::{Collider, ColliderKey};
use crate::collision::{sweep_rect, CollisionFilter, CollisionResponse, Contact, SweepHit};
use chargejump_math::{Rect, Vec2};
use slotmap::SlotMap;

/// Configuration for the collision world
#[derive(Clone, Debug)]
pub struct WorldConfig {
    /// Side length of a broadphase grid cell in world units
    pub cell_size: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self { cell_size: 64.0 }
    }
}

impl WorldConfig {
    pub fn new(cell_size: f32) -> Self {
        Self { cell_size }
    }
}

/// Outcome of moving a collider through the world
#[derive(Clone, Debug, PartialEq)]
pub struct MoveResult {
    /// The collider's rectangle after the move
    pub rect: Rect,
    /// Contacts in the order they were resolved
    pub contacts: Vec<Contact>,
}

/// Uniform grid mapping cells to the colliders overlapping them
#[derive(Debug, Default)]
struct SpatialGrid {
    cell_size: f32,
    cells: HashMap<(i32, i32), Vec<ColliderKey>>,
}

impl SpatialGrid {
    fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    fn cell_range(&self, rect: &Rect) -> (i32, i32, i32, i32) {
        let cs = self.cell_size;
        (
            (rect.left() / cs).floor() as i32,
            (rect.top() / cs).floor() as i32,
            (rect.right() / cs).floor() as i32,
            (rect.bottom() / cs).floor() as i32,
        )
    }

    fn insert(&mut self, key: ColliderKey, rect: &Rect) {
        let (x0, y0, x1, y1) = self.cell_range(rect);
        for cy in y0..=y1 {
            for cx in x0..=x1 {
                self.cells.entry((cx, cy)).or_default().push(key);
            }
        }
    }

    fn remove(&mut self, key: ColliderKey, rect: &Rect) {
        let (x0, y0, x1, y1) = self.cell_range(rect);
        for cy in y0..=y1 {
            for cx in x0..=x1 {
                if let Some(cell) = self.cells.get_mut(&(cx, cy)) {
                    cell.retain(|k| *k != key);
                    if cell.is_empty() {
                        self.cells.remove(&(cx, cy));
                    }
                }
            }
        }
    }

    /// Candidate keys in cells touched by `rect`, in key order
    fn query(&self, rect: &Rect) -> BTreeSet<ColliderKey> {
        let (x0, y0, x1, y1) = self.cell_range(rect);
        let mut found = BTreeSet::new();
        for cy in y0..=y1 {
            for cx in x0..=x1 {
                if let Some(cell) = self.cells.get(&(cx, cy)) {
                    found.extend(cell.iter().copied());
                }
            }
        }
        found
    }
}

/// The collision world containing every collider of a level
pub struct CollisionWorld {
    /// All colliders (using generational keys)
    colliders: SlotMap<ColliderKey, Collider>,
    grid: SpatialGrid,
    pub config: WorldConfig,
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionWorld {
    /// Create a new world with default configuration
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    pub fn with_config(config: WorldConfig) -> Self {
        Self {
            colliders: SlotMap::with_key(),
            grid: SpatialGrid::new(config.cell_size),
            config,
        }
    }

    /// Add a collider and return its key
    pub fn insert(&mut self, collider: Collider) -> ColliderKey {
        let key = self.colliders.insert(collider);
        self.grid.insert(key, &collider.rect);
        key
    }

    /// Remove a collider and return it
    pub fn remove(&mut self, key: ColliderKey) -> Option<Collider> {
        let collider = self.colliders.remove(key)?;
        self.grid.remove(key, &collider.rect);
        Some(collider)
    }

    pub fn get(&self, key: ColliderKey) -> Option<&Collider> {
        self.colliders.get(key)
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Iterate over every collider with its key
    pub fn iter(&self) -> impl Iterator<Item = (ColliderKey, &Collider)> + '_ {
        self.colliders.iter()
    }

    /// Teleport a collider to a new rectangle without collision checks
    ///
    /// Returns false if the key is stale.
    pub fn update(&mut self, key: ColliderKey, rect: Rect) -> bool {
        let Some(collider) = self.colliders.get_mut(key) else {
            return false;
        };
        let old = collider.rect;
        collider.rect = rect;
        self.grid.remove(key, &old);
        self.grid.insert(key, &rect);
        true
    }

    /// Keys of colliders strictly overlapping `rect`
    pub fn query_rect(&self, rect: &Rect) -> Vec<ColliderKey> {
        self.grid
            .query(rect)
            .into_iter()
            .filter(|key| {
                self.colliders
                    .get(*key)
                    .is_some_and(|c| c.rect.intersects(rect))
            })
            .collect()
    }

    /// Compute where a collider would end up moving toward `goal`
    ///
    /// Resolves contacts earliest-first (ties by key). Solid contacts stop the
    /// mover on the contact axis and let the remaining motion slide along the
    /// other; passthrough contacts are only recorded. Each other collider is
    /// resolved at most once per move. Does not mutate the world.
    pub fn check(
        &self,
        key: ColliderKey,
        goal: Vec2,
        velocity: Vec2,
        filter: &dyn CollisionFilter,
    ) -> Option<(Vec2, Vec<Contact>)> {
        let mover = *self.colliders.get(key)?;
        let mut position = mover.rect.position();
        let mut goal = goal;
        let mut visited = HashSet::new();
        visited.insert(key);
        let mut contacts = Vec::new();

        loop {
            let current = mover.rect.with_position(position);
            let delta = goal - position;
            let swept = current.union(&current.with_position(goal));

            let mut best: Option<(SweepHit, ColliderKey, CollisionResponse)> = None;
            for other_key in self.grid.query(&swept) {
                if visited.contains(&other_key) {
                    continue;
                }
                let Some(other) = self.colliders.get(other_key) else {
                    continue;
                };
                let response = filter.classify(&mover, other, velocity);
                if response == CollisionResponse::None {
                    continue;
                }
                let Some(hit) = sweep_rect(&current, delta, &other.rect) else {
                    continue;
                };
                let earlier = match &best {
                    None => true,
                    Some((b, _, _)) => hit.time_of_impact < b.time_of_impact,
                };
                if earlier {
                    best = Some((hit, other_key, response));
                }
            }

            let Some((hit, other_key, response)) = best else {
                break;
            };
            visited.insert(other_key);

            let other = &self.colliders[other_key];
            contacts.push(Contact {
                normal: hit.normal,
                other: other_key,
                tag: other.tag,
                surface: other.surface,
                touch: hit.touch,
                time_of_impact: hit.time_of_impact,
                response,
            });

            if response == CollisionResponse::Solid {
                position = hit.touch;
                if hit.normal.x != 0.0 {
                    goal.x = hit.touch.x;
                }
                if hit.normal.y != 0.0 {
                    goal.y = hit.touch.y;
                }
            }
        }

        Some((goal, contacts))
    }

    /// Move a collider toward `goal` and commit the resolved position
    ///
    /// Returns None if the key is stale.
    pub fn move_collider(
        &mut self,
        key: ColliderKey,
        goal: Vec2,
        velocity: Vec2,
        filter: &dyn CollisionFilter,
    ) -> Option<MoveResult> {
        let (position, contacts) = self.check(key, goal, velocity, filter)?;
        let rect = self.colliders.get(key)?.rect.with_position(position);
        self.update(key, rect);
        Some(MoveResult { rect, contacts })
    }
}
