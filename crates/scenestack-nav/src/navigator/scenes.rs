#![forbid(unsafe_code)]

//! Declarative scene list.

use std::collections::HashMap;
use std::rc::Rc;

use scenestack_core::Spring;

use super::Navigator;
use crate::host::SceneHost;
use crate::route::{Route, RouteId};

/// One scene the host should keep rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneDescriptor<R> {
    /// Stable key for the host's scene subtree.
    pub key: RouteId,
    pub route: R,
    /// Whether the scene was presented when this descriptor was built.
    pub interactive: bool,
}

impl<R: Route, H: SceneHost, S: Spring> Navigator<R, H, S> {
    /// Describe every scene in stack order.
    ///
    /// Descriptors of non-presented scenes whose route and key are unchanged
    /// are reused, so hosts can skip re-rendering them by pointer identity.
    pub fn scenes(&mut self) -> Vec<Rc<SceneDescriptor<R>>> {
        let presented = self.state.presented_index;
        let mut rendered = HashMap::with_capacity(self.stack.len());
        let mut scenes = Vec::with_capacity(self.stack.len());
        for (index, route) in self.stack.routes().iter().enumerate() {
            let key = self.keys.key(route);
            let cached = self
                .rendered
                .get(route)
                .filter(|scene| index != presented && !scene.interactive && scene.key == key)
                .cloned();
            let scene = cached.unwrap_or_else(|| {
                Rc::new(SceneDescriptor {
                    key,
                    route: route.clone(),
                    interactive: index == presented,
                })
            });
            rendered.insert(route.clone(), Rc::clone(&scene));
            scenes.push(scene);
        }
        self.rendered = rendered;
        scenes
    }
}
