use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Entities of the live stage, kept in spawn order.
///
/// Spawn order is draw order inside a render layer, so removals shift
/// rather than swap. A stage holds at most a few hundred entities and
/// everything is a linear scan.
#[derive(Debug, Default)]
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self { entities: Vec::with_capacity(256) }
    }

    pub fn spawn(&mut self, entity: Entity) {
        debug_assert!(self.get(entity.id).is_none(), "duplicate entity {:?}", entity.id);
        self.entities.push(entity);
    }

    pub fn spawn_all(&mut self, entities: impl IntoIterator<Item = Entity>) {
        self.entities.extend(entities);
    }

    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let at = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(at))
    }

    /// Drops every entity carrying `tag` and returns the count.
    pub fn despawn_tagged(&mut self, tag: &str) -> usize {
        let len = self.entities.len();
        self.entities.retain(|e| e.tag != tag);
        len - self.entities.len()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    pub fn tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Entity> + 'a {
        self.entities.iter().filter(move |e| e.tag == tag)
    }

    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    pub fn count_tagged(&self, tag: &str) -> usize {
        self.tagged(tag).count()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn ids(scene: &Scene) -> Vec<u32> {
        scene.iter().map(|e| e.id.0).collect()
    }

    #[test]
    fn despawn_keeps_draw_order() {
        let mut scene = Scene::new();
        scene.spawn_all((1..=4).map(|n| Entity::new(EntityId(n))));

        assert!(scene.despawn(EntityId(2)).is_some());
        assert_eq!(ids(&scene), vec![1, 3, 4]);
        assert!(scene.despawn(EntityId(2)).is_none());
    }

    #[test]
    fn lookups_by_id() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(7)).with_pos(Vec2::new(640.0, 360.0)));
        if let Some(cake) = scene.get_mut(EntityId(7)) {
            cake.pos.y -= 40.0;
        }
        assert_eq!(scene.get(EntityId(7)).map(|e| e.pos), Some(Vec2::new(640.0, 320.0)));
        assert!(scene.get(EntityId(8)).is_none());
    }

    #[test]
    fn tag_queries() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_tag("tile"));
        scene.spawn(Entity::new(EntityId(2)).with_tag("caption"));
        scene.spawn(Entity::new(EntityId(3)).with_tag("tile"));

        assert_eq!(scene.count_tagged("tile"), 2);
        assert_eq!(scene.find_by_tag("caption").map(|e| e.id), Some(EntityId(2)));
        assert_eq!(scene.despawn_tagged("tile"), 2);
        assert_eq!(ids(&scene), vec![2]);
        assert_eq!(scene.tagged("tile").count(), 0);

        scene.clear();
        assert!(scene.is_empty());
    }

    #[test]
    fn found_entity_outlives_the_tag_string() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(5)).with_tag("slide-2"));

        let found = {
            let tag = format!("slide-{}", 2);
            scene.find_by_tag(&tag)
        };
        assert_eq!(found.map(|e| e.id), Some(EntityId(5)));
    }
}
