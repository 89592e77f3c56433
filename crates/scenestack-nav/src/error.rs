#![forbid(unsafe_code)]

//! Navigator errors.
//!
//! Every variant is a contract violation by the caller or the embedding
//! host. Operations validate before mutating, so an `Err` leaves the route
//! stack and transition state exactly as they were. The exception is
//! [`NavigatorError::QueuedRouteMissing`], which `advance` reports after the
//! settled transition has been applied and the next runnable queued
//! transition has started.

/// Errors reported by the navigator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigatorError {
    /// The builder was given neither an initial route nor a route stack.
    MissingInitialRoute,
    /// The initial route is not an element of the initial route stack.
    InitialRouteNotInStack,
    /// `immediately_reset_route_stack` was called with no routes.
    EmptyRouteStack,
    /// The builder was not given a scene host.
    MissingSceneHost,
    /// The named operation referenced a route that is not in the stack.
    RouteNotFound { operation: &'static str },
    /// A pop would move below the first route.
    PopBelowZero { from: usize, count: usize },
    /// A pop named a route above the one it would pop from.
    RouteAheadOfTarget { index: usize, target: usize },
    /// A jump would land before the first route.
    JumpBeforeFirst { target: isize },
    /// A jump would land past the last route.
    JumpPastLast { target: isize, last: usize },
    /// No scene configuration exists for the transition endpoints.
    UnconfiguredScene { index: isize },
    /// The responder was granted without a matched gesture.
    ResponderGrantedUnexpectedly,
    /// A queued transition's destination left the stack before it ran.
    QueuedRouteMissing { index: usize, len: usize },
}

impl std::fmt::Display for NavigatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingInitialRoute => {
                write!(f, "navigator requires an initial route or route stack")
            }
            Self::InitialRouteNotInStack => write!(f, "initial route is not in the route stack"),
            Self::EmptyRouteStack => write!(f, "route stack must contain at least one route"),
            Self::MissingSceneHost => write!(f, "navigator requires a scene host"),
            Self::RouteNotFound { operation } => {
                write!(f, "{operation}: route is not in the route stack")
            }
            Self::PopBelowZero { from, count } => {
                write!(f, "cannot pop {count} routes from index {from}")
            }
            Self::RouteAheadOfTarget { index, target } => {
                write!(f, "cannot pop forward to index {index} from index {target}")
            }
            Self::JumpBeforeFirst { target } => {
                write!(f, "cannot jump before the first route (target {target})")
            }
            Self::JumpPastLast { target, last } => {
                write!(f, "cannot jump past the last route (target {target}, last {last})")
            }
            Self::UnconfiguredScene { index } => {
                write!(f, "cannot configure scene at index {index}")
            }
            Self::ResponderGrantedUnexpectedly => write!(f, "responder granted unexpectedly"),
            Self::QueuedRouteMissing { index, len } => write!(
                f,
                "queued transition targets index {index} but the stack has {len} routes"
            ),
        }
    }
}

impl std::error::Error for NavigatorError {}

/// Navigator result type.
pub type Result<T> = std::result::Result<T, NavigatorError>;
