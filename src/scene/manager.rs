//! Scene stack management with end-of-frame switching

use macroquad::prelude::warn;

use super::{Scene, SceneAction};
use crate::render::RenderTarget;

/// A stored scene plus its init-once flag
struct Slot {
    scene: Box<dyn Scene>,
    initialized: bool,
}

/// Owns every scene: one active, the rest stacked inactive.
///
/// `set_active` only records the request; `apply_pending_switch` performs it
/// at the end of the frame cycle.
pub struct SceneManager {
    active: Option<Slot>,
    inactive: Vec<Slot>,
    next: Option<String>,
}

impl SceneManager {
    pub fn new() -> Self {
        Self {
            active: None,
            inactive: Vec::new(),
            next: None,
        }
    }

    /// Push a scene onto the inactive stack without initializing it.
    ///
    /// A scene with the same id replaces the stored one.
    pub fn add(&mut self, scene: Box<dyn Scene>) {
        if let Some(pos) = self.position_of(scene.id()) {
            warn!("scene '{}' already registered, replacing", scene.id());
            let mut old = self.inactive.remove(pos);
            if old.initialized {
                old.scene.cleanup();
            }
        }
        self.inactive.push(Slot {
            scene,
            initialized: false,
        });
    }

    /// Request activation of a registered scene; applied at end of frame
    pub fn set_active(&mut self, id: &str) {
        self.next = Some(id.to_string());
    }

    /// Id of the currently active scene
    pub fn active_id(&self) -> Option<&str> {
        self.active.as_ref().map(|slot| slot.scene.id())
    }

    /// Remove and clean up an inactive scene.
    ///
    /// The active scene cannot be removed; returns whether a scene was
    /// dropped.
    pub fn remove(&mut self, id: &str) -> bool {
        if self.active_id() == Some(id) {
            warn!("cannot remove active scene '{}'", id);
            return false;
        }
        match self.position_of(id) {
            Some(pos) => {
                let mut slot = self.inactive.remove(pos);
                if slot.initialized {
                    slot.scene.cleanup();
                }
                true
            }
            None => false,
        }
    }

    /// Drop every inactive scene after running its cleanup
    pub fn remove_all_inactive(&mut self) {
        for slot in &mut self.inactive {
            if slot.initialized {
                slot.scene.cleanup();
            }
        }
        self.inactive.clear();
    }

    /// Drop everything, active scene included. Used at shutdown.
    pub fn clear(&mut self) {
        if let Some(mut slot) = self.active.take() {
            if slot.initialized {
                slot.scene.cleanup();
            }
        }
        self.remove_all_inactive();
        self.next = None;
    }

    /// Forward one frame update to the active scene
    pub fn update(&mut self, dt: f32) -> SceneAction {
        match &mut self.active {
            Some(slot) => slot.scene.update(dt),
            None => SceneAction::Continue,
        }
    }

    /// Forward the draw pass to the active scene
    pub fn draw(&mut self, target: &mut dyn RenderTarget) {
        if let Some(slot) = &mut self.active {
            slot.scene.draw(target);
        }
    }

    /// Perform the requested switch, if any. Call at the end of the frame.
    ///
    /// The outgoing scene is paused and stacked; the incoming one is
    /// initialized on its first activation and resumed on later ones.
    /// Unknown ids are ignored with a warning. Returns whether the active
    /// scene changed.
    pub fn apply_pending_switch(&mut self) -> bool {
        let id = match self.next.take() {
            Some(id) => id,
            None => return false,
        };
        if self.active_id() == Some(id.as_str()) {
            return false;
        }
        let pos = match self.position_of(&id) {
            Some(pos) => pos,
            None => {
                warn!("unknown scene '{}', switch ignored", id);
                return false;
            }
        };

        let mut incoming = self.inactive.remove(pos);
        if let Some(mut outgoing) = self.active.take() {
            outgoing.scene.pause();
            self.inactive.push(outgoing);
        }

        if incoming.initialized {
            incoming.scene.resume();
        } else {
            incoming.scene.init();
            incoming.initialized = true;
        }
        self.active = Some(incoming);
        true
    }

    fn position_of(&self, id: &str) -> Option<usize> {
        self.inactive.iter().position(|slot| slot.scene.id() == id)
    }
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Scene that appends lifecycle events to a shared journal
    struct Probe {
        id: String,
        journal: Rc<RefCell<Vec<String>>>,
    }

    impl Probe {
        fn new(id: &str, journal: &Rc<RefCell<Vec<String>>>) -> Box<Self> {
            Box::new(Self {
                id: id.to_string(),
                journal: journal.clone(),
            })
        }

        fn log(&self, event: &str) {
            self.journal.borrow_mut().push(format!("{}:{}", self.id, event));
        }
    }

    impl Scene for Probe {
        fn id(&self) -> &str {
            &self.id
        }
        fn init(&mut self) {
            self.log("init");
        }
        fn pause(&mut self) {
            self.log("pause");
        }
        fn resume(&mut self) {
            self.log("resume");
        }
        fn update(&mut self, _dt: f32) -> SceneAction {
            self.log("update");
            SceneAction::Continue
        }
        fn draw(&mut self, _target: &mut dyn RenderTarget) {
            self.log("draw");
        }
        fn cleanup(&mut self) {
            self.log("cleanup");
        }
    }

    fn journal() -> Rc<RefCell<Vec<String>>> {
        Rc::new(RefCell::new(Vec::new()))
    }

    #[test]
    fn test_add_does_not_initialize() {
        let j = journal();
        let mut mgr = SceneManager::new();
        mgr.add(Probe::new("menu", &j));
        assert!(j.borrow().is_empty());
        assert_eq!(mgr.active_id(), None);
    }

    #[test]
    fn test_switch_is_deferred_to_end_of_frame() {
        let j = journal();
        let mut mgr = SceneManager::new();
        mgr.add(Probe::new("menu", &j));
        mgr.set_active("menu");
        // Nothing happens until the frame cycle ends
        assert_eq!(mgr.active_id(), None);
        assert!(mgr.apply_pending_switch());
        assert_eq!(mgr.active_id(), Some("menu"));
        assert_eq!(*j.borrow(), ["menu:init"]);
    }

    #[test]
    fn test_init_once_then_pause_resume() {
        let j = journal();
        let mut mgr = SceneManager::new();
        mgr.add(Probe::new("menu", &j));
        mgr.add(Probe::new("game", &j));

        mgr.set_active("menu");
        mgr.apply_pending_switch();
        mgr.set_active("game");
        mgr.apply_pending_switch();
        mgr.set_active("menu");
        mgr.apply_pending_switch();

        assert_eq!(
            *j.borrow(),
            [
                "menu:init",
                "menu:pause",
                "game:init",
                "game:pause",
                "menu:resume",
            ]
        );
    }

    #[test]
    fn test_switch_to_unknown_scene_is_ignored() {
        let j = journal();
        let mut mgr = SceneManager::new();
        mgr.add(Probe::new("menu", &j));
        mgr.set_active("menu");
        mgr.apply_pending_switch();

        mgr.set_active("missing");
        assert!(!mgr.apply_pending_switch());
        assert_eq!(mgr.active_id(), Some("menu"));
    }

    #[test]
    fn test_switch_to_self_is_a_noop() {
        let j = journal();
        let mut mgr = SceneManager::new();
        mgr.add(Probe::new("menu", &j));
        mgr.set_active("menu");
        mgr.apply_pending_switch();

        mgr.set_active("menu");
        assert!(!mgr.apply_pending_switch());
        // No pause/resume fired
        assert_eq!(*j.borrow(), ["menu:init"]);
    }

    #[test]
    fn test_cannot_remove_active_scene() {
        let j = journal();
        let mut mgr = SceneManager::new();
        mgr.add(Probe::new("menu", &j));
        mgr.set_active("menu");
        mgr.apply_pending_switch();

        assert!(!mgr.remove("menu"));
        assert_eq!(mgr.active_id(), Some("menu"));
    }

    #[test]
    fn test_remove_inactive_runs_cleanup() {
        let j = journal();
        let mut mgr = SceneManager::new();
        mgr.add(Probe::new("menu", &j));
        mgr.add(Probe::new("game", &j));
        mgr.set_active("menu");
        mgr.apply_pending_switch();
        mgr.set_active("game");
        mgr.apply_pending_switch();

        // "menu" is inactive and initialized: cleanup must run
        assert!(mgr.remove("menu"));
        assert!(j.borrow().contains(&"menu:cleanup".to_string()));

        // Never-initialized scenes are dropped without cleanup
        mgr.add(Probe::new("credits", &j));
        assert!(mgr.remove("credits"));
        assert!(!j.borrow().contains(&"credits:cleanup".to_string()));
    }

    #[test]
    fn test_update_and_draw_reach_only_active_scene() {
        let j = journal();
        let mut mgr = SceneManager::new();
        mgr.add(Probe::new("menu", &j));
        mgr.add(Probe::new("game", &j));
        mgr.set_active("menu");
        mgr.apply_pending_switch();

        struct NullTarget;
        impl RenderTarget for NullTarget {
            fn draw(
                &mut self,
                _buffer: &crate::render::VertexBuffer,
                _states: &crate::render::RenderStates,
            ) {
            }
        }

        mgr.update(0.016);
        mgr.draw(&mut NullTarget);
        let entries = j.borrow();
        assert!(entries.contains(&"menu:update".to_string()));
        assert!(entries.contains(&"menu:draw".to_string()));
        assert!(!entries.iter().any(|e| e.starts_with("game:")));
    }

    #[test]
    fn test_clear_cleans_everything_up() {
        let j = journal();
        let mut mgr = SceneManager::new();
        mgr.add(Probe::new("menu", &j));
        mgr.add(Probe::new("game", &j));
        mgr.set_active("menu");
        mgr.apply_pending_switch();
        mgr.set_active("game");
        mgr.apply_pending_switch();

        mgr.clear();
        let entries = j.borrow();
        assert!(entries.contains(&"menu:cleanup".to_string()));
        assert!(entries.contains(&"game:cleanup".to_string()));
        assert_eq!(mgr.active_id(), None);
    }
}
