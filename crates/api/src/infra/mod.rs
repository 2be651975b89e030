//! Infrastructure layer - External systems integration
//!
//! - Database connection, migrations and repositories
//! - Unit of Work for transaction management

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    ProductRepository, ScrapeErrorRepository, ShoppingListRepository, UserRecord, UserRepository,
};
pub use unit_of_work::{Persistence, TransactionContext, TxFuture, UnitOfWork};
