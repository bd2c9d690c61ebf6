//! Controller registration.
//!
//! # Responsibilities
//! - Map `(controller, action)` names to typed action functions
//! - Carry each controller's authentication policy
//! - Derive controller identifiers from route names
//!
//! # Design Decisions
//! - Built once at startup, read-only afterwards
//! - Lookup by identifier (`status` → `StatusController`); a missing
//!   controller or action is a not-found, never a panic

use std::collections::{HashMap, HashSet};

use crate::dispatch::context::{ActionContext, ActionResult};

/// An action handler.
pub type ActionFn = fn(&mut ActionContext<'_>) -> ActionResult;

/// Which actions of a controller require an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthPolicy {
    /// Every action is public.
    #[default]
    Public,
    /// Only the listed actions require authentication.
    Actions(HashSet<&'static str>),
    /// Every action requires authentication.
    All,
}

impl AuthPolicy {
    pub fn requires_authentication(&self, action: &str) -> bool {
        match self {
            AuthPolicy::Public => false,
            AuthPolicy::Actions(actions) => actions.contains(action),
            AuthPolicy::All => true,
        }
    }
}

/// A named set of actions plus its auth policy.
#[derive(Clone)]
pub struct Controller {
    name: &'static str,
    auth: AuthPolicy,
    actions: HashMap<&'static str, ActionFn>,
}

impl Controller {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            auth: AuthPolicy::Public,
            actions: HashMap::new(),
        }
    }

    /// Declare the auth set: these actions require authentication.
    pub fn auth_actions(mut self, actions: &[&'static str]) -> Self {
        self.auth = AuthPolicy::Actions(actions.iter().copied().collect());
        self
    }

    /// Require authentication for every action.
    pub fn auth_all(mut self) -> Self {
        self.auth = AuthPolicy::All;
        self
    }

    pub fn action(mut self, name: &'static str, handler: ActionFn) -> Self {
        self.actions.insert(name, handler);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn auth_policy(&self) -> &AuthPolicy {
        &self.auth
    }

    pub fn find_action(&self, action: &str) -> Option<ActionFn> {
        self.actions.get(action).copied()
    }
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut actions: Vec<&str> = self.actions.keys().copied().collect();
        actions.sort_unstable();
        f.debug_struct("Controller")
            .field("name", &self.name)
            .field("auth", &self.auth)
            .field("actions", &actions)
            .finish()
    }
}

/// Controller identifier for a route's controller name: `status` → `StatusController`.
pub fn controller_id(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => format!("{}{}Controller", first.to_uppercase(), chars.as_str()),
        None => "Controller".to_string(),
    }
}

/// Static registration table of controllers.
#[derive(Debug, Clone, Default)]
pub struct ControllerRegistry {
    controllers: HashMap<String, Controller>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, controller: Controller) -> Self {
        self.controllers
            .insert(controller_id(controller.name), controller);
        self
    }

    /// Look up the controller a route names.
    pub fn find(&self, name: &str) -> Option<&Controller> {
        self.controllers.get(&controller_id(name))
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}
