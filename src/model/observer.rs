use crate::model::creature::Creature;
use crate::model::food::Food;
use uuid::Uuid;

/// Lifecycle hooks for external collaborators (renderers, UIs).
///
/// The core calls these when entities enter or leave the world so a scene
/// graph can attach or release its resources; none of them feed back into
/// simulation outcomes. `overlay_visibility` mirrors the debug perception-cone
/// toggle.
pub trait WorldHooks {
    fn creature_added(&mut self, _creature: &Creature) {}
    fn creature_removed(&mut self, _id: Uuid) {}
    fn food_added(&mut self, _food: &Food) {}
    fn food_removed(&mut self, _id: Uuid) {}
    fn overlay_visibility(&mut self, _visible: bool) {}
}

/// Default hooks for headless runs.
pub struct NoopHooks;

impl WorldHooks for NoopHooks {}
