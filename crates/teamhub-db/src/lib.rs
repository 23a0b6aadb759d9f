//! # teamhub-db
//!
//! Database layer implementing the repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management and migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations, transactional where an operation spans rows
//! - [`MemoryStore`], an in-process implementation of every repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use teamhub_db::{create_pool, PgMemberRepository, PoolConfig};
//! use teamhub_core::traits::MemberRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::default()).await?;
//!     let members = PgMemberRepository::new(pool);
//!     let roster = members.find_by_team(team_id).await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::MemoryStore;
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{
    PgJoinRequestRepository, PgMemberRepository, PgParticipantRepository, PgTeamEventRepository,
    PgTeamRepository,
};
