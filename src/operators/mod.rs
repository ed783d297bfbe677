//! Operator tags of the expression tree.
//!
//! Both operator sets are closed: every tag knows its scalar transform, the symbol it is
//! printed with, and the keyword or character it is parsed from. Lookups are `match`
//! tables over the enums, so adding a tag forces every table to handle it.

mod binary;
mod unary;

pub use binary::BinaryOp;
pub use unary::UnaryOp;
