//! Path expressions over HTML element trees.
//!
//! # Supported Syntax
//!
//! - `/a/b` - absolute path from the document node
//! - `//b` - `b` anywhere in the document
//! - `*` - any element
//! - `[n]`, `[position()=n]`, `[last()]` - position among the step's candidates
//! - `[@attr]`, `[@attr="v"]`, `[@attr!="v"]` - attribute tests
//! - `[text()="v"]` - the element's own text
//! - `[contains(x,"v")]`, `[starts-with(x,"v")]` - `x` is `@attr`, `text()` or `.`
//! - `and`, `or`, `not(…)` and parentheses inside predicates
//! - `/@attr` - final segment selecting an attribute value
//!
//! # Examples
//!
//! ```
//! // //*[@id="login"]                   - the element with id "login"
//! // /html/body/div[3]/span             - spans in the third body div
//! // //*[contains(@class,"card")]       - every element with class "card"
//! // //nav/a/@href                      - link destinations in navigation
//! ```

pub mod ast;
pub mod breadcrumb;
pub mod compile;
pub mod error;
pub mod evaluator;
pub mod generator;
pub mod segments;

pub use ast::{PathExpression, Predicate, Step};
pub use breadcrumb::{Affordance, Breadcrumbs};
pub use error::{EvalError, ParseError, XPathError};
pub use evaluator::{Evaluator, Match, MatchSet};
pub use generator::{GeneratedPath, PathGenerator, Strategy};
pub use segments::{Origin, ParsedPath};
