//! # Typlox
//!
//! A small statically-typed scripting language. Source text goes through
//! four phases before anything runs.
//!
//! User's source code: `long total = count * 2;`

//! ## Scanning
//!
//! The scanner turns characters into tokens. Numbers get their narrowest
//! type here, `2` is an `int` and `3000000000` a `long`. A parenthesized type
//! name such as `(double)` collapses into a single cast token.
//!
//! Whitespaces and comments are dropped. So the tokens are
//! `["long", "total", "=", "count", "*", "2", ";"]`.

//! ## Parsing
//!
//! A recursive-descent parser builds the AST and reports syntax errors. It
//! doesn't stop on the first one: it skips to the next statement boundary and
//! carries on, so one pass reports every broken statement.
//!
//! ``` markdown
//! total: long (Stmt.Var)
//! └── * (Expr.Binary)
//!     ├── count (Expr.Variable)
//!     └── 2 (Expr.Literal)
//! ```

//! ## Emission
//!
//! Names are resolved against a stack of lexical scopes and every operand
//! type is checked. Mixed numeric operands are promoted along
//! `int ⊂ long ⊂ double`, and every conversion becomes an explicit IR node.
//! Above, if `count` is an `int` the product is an `int` and a widening
//! conversion to `long` wraps it before the store.
//!
//! Resolution and type errors end the run before anything executes.

//! ## Running
//!
//! The whole IR tree is compiled into one callable, a tree of closures that
//! reads and writes numbered slots, and invoked once. If the last statement
//! leaves a value, it is printed after the run.

pub mod cli;
mod emitter;
mod environment;
mod error;
mod interpreter;
mod parser;
mod scanner;
mod statement;
mod typlox;

pub use emitter::SemanticType;
pub use error::{
	RunError, TyploxError,
	diagnostic::{Diagnostic, Diagnostics, Location},
	emitter::{EmitError, EmitErrorKind, ErrorCategory},
	parser::{ParseError, ParseErrorType},
	runtime::RuntimeFailure,
	scanner::{ScanError, ScanErrorType},
};
pub use interpreter::compile_and_run;
pub use parser::parse;
pub use scanner::{Scanner, Token, TokenType, lex};
pub use statement::Statement;
pub use typlox::{RunOptions, Typlox};
