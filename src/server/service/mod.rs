//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Authorization**: Checking the caller's role on the board being mutated
//! - **Business Logic**: Applying ordering-engine operations to the loaded board aggregate
//! - **Persistence**: Saving the whole aggregate once per request
//! - **Side Effects**: Dispatching notification drafts after the save has succeeded

pub mod auth;
pub mod board;
pub mod column;
pub mod invitation;
pub mod notification;
pub mod task;

#[cfg(test)]
mod test;
