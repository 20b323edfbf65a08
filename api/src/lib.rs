// Module layout (Clean Architecture style)
// - bootstrap: configuration and service wiring
// - infrastructure: DB/in-memory store/password hashing adapters
// - presentation: HTTP handlers and routing
// - application: forms, ports and use cases
// - domain: core models

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
