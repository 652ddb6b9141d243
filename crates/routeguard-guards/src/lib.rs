//! # Routeguard Guards
//!
//! Route access control: the validator that checks requirements in precedence order,
//! the gate that defers decisions until the session resolves, the route table, and the
//! enforcer that turns denials into redirects.

pub mod checks;
pub mod decision;
pub mod enforcer;
pub mod gate;
pub mod prelude;
pub mod route_table;
pub mod validator;

pub use decision::{AccessDecision, Denial, DenialReason, LookupCheck};
pub use enforcer::{Enforcement, RouteEnforcer};
pub use gate::AccessGate;
pub use route_table::RouteTable;
pub use validator::AccessValidator;
