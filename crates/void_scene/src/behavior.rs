//! Runtime behaviors attached to scene objects
//!
//! The runtime drives per-object scripts through the [`Behavior`] trait.
//! Each hook receives a [`BehaviorContext`] scoped to the owning object; a
//! behavior whose object has been removed from the scene is skipped.

use crate::id::ObjectId;
use crate::object::GameObject;
use crate::store::Scene;
use crate::transform::{world_transform, WorldTransform};

/// Access to the object a behavior is attached to
pub struct BehaviorContext<'a> {
    object: &'a mut GameObject,
    world: Option<WorldTransform>,
}

impl<'a> BehaviorContext<'a> {
    /// The owning object
    pub fn object(&self) -> &GameObject {
        &*self.object
    }

    /// The owning object, mutably
    pub fn object_mut(&mut self) -> &mut GameObject {
        &mut *self.object
    }

    /// World transform of the owning object at the start of this hook
    pub fn world(&self) -> Option<WorldTransform> {
        self.world
    }
}

/// Per-object runtime logic.
///
/// All hooks default to doing nothing.
pub trait Behavior: Send {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Called once before the first update
    fn on_start(&mut self, _ctx: &mut BehaviorContext<'_>) {}

    /// Called every frame with the elapsed time in seconds
    fn on_update(&mut self, _ctx: &mut BehaviorContext<'_>, _dt: f64) {}

    /// Called when the owning object starts touching another object
    fn on_collision(&mut self, _ctx: &mut BehaviorContext<'_>, _other: &ObjectId) {}
}

/// Spins its object at a fixed rate
#[derive(Debug, Clone)]
pub struct Rotator {
    /// Degrees per second
    pub speed: f64,
}

impl Default for Rotator {
    fn default() -> Self {
        Self { speed: 90.0 }
    }
}

impl Behavior for Rotator {
    fn name(&self) -> &str {
        "Rotator"
    }

    fn on_update(&mut self, ctx: &mut BehaviorContext<'_>, dt: f64) {
        ctx.object_mut().transform.rotation += self.speed * dt;
    }
}

struct Attached {
    object: ObjectId,
    behavior: Box<dyn Behavior>,
    started: bool,
}

/// Owns behaviors and dispatches lifecycle hooks over a scene
#[derive(Default)]
pub struct BehaviorHost {
    attached: Vec<Attached>,
}

impl BehaviorHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a behavior to an object
    pub fn attach(&mut self, object: ObjectId, behavior: Box<dyn Behavior>) {
        log::debug!("Attaching {} to {}", behavior.name(), object);
        self.attached.push(Attached {
            object,
            behavior,
            started: false,
        });
    }

    /// Drop all behaviors of an object
    pub fn detach_all(&mut self, object: &ObjectId) {
        self.attached.retain(|a| a.object != *object);
    }

    /// Number of attached behaviors
    pub fn len(&self) -> usize {
        self.attached.len()
    }

    /// Check if no behaviors are attached
    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }

    /// Run `on_start` for behaviors that have not started yet, then `on_update`
    /// for every behavior whose object is live and active.
    pub fn update(&mut self, scene: &mut Scene, dt: f64) {
        for attached in &mut self.attached {
            let world = world_transform(scene, &attached.object);
            let Some(object) = scene.find_mut(&attached.object) else {
                continue;
            };
            if !object.active {
                continue;
            }
            let mut ctx = BehaviorContext { object, world };
            if !attached.started {
                attached.behavior.on_start(&mut ctx);
                attached.started = true;
            }
            attached.behavior.on_update(&mut ctx, dt);
        }
    }

    /// Notify an object's behaviors of a collision
    pub fn collide(&mut self, scene: &mut Scene, object: &ObjectId, other: &ObjectId) {
        for attached in self.attached.iter_mut().filter(|a| a.object == *object) {
            let world = world_transform(scene, object);
            let Some(target) = scene.find_mut(object) else {
                log::warn!("Collision reported for missing object {}", object);
                return;
            };
            let mut ctx = BehaviorContext { object: target, world };
            attached.behavior.on_collision(&mut ctx, other);
        }
    }
}
