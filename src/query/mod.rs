//! Boolean query engine
//!
//! A query line is lexed into terms and operators, Porter-stemmed, converted
//! to postfix by shunting-yard (with AND implied between adjacent values),
//! and evaluated by a stack machine over the sorted doc-id lists of the
//! index. Parsing is tolerant by design: unknown bytes are skipped, operator
//! underflow evaluates against empty operands, and unmatched parentheses are
//! discarded.

mod eval;
mod lexer;
mod rpn;

pub use eval::{evaluate, search, SearchHit, SearchResults};
pub use lexer::{lex, QueryToken};
pub use rpn::{to_rpn, RpnItem};
