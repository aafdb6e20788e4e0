// Module layout (Clean Architecture style)
// - bootstrap: configuration and startup wiring
// - infrastructure: Postgres and AMQP adapters
// - presentation: HTTP handlers and routing
// - application: ports, use cases, access policies and the broker RPC core
// - domain: core models

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
