//! flock-domain
//!
//! Plain record types handed over by the data provider (people, transactions, alerts).
//! No I/O, no aggregation. Only data types, label parsing.

pub mod alert;
pub mod common;
pub mod person;
pub mod transaction;

pub use alert::*;
pub use common::*;
pub use person::*;
pub use transaction::*;
