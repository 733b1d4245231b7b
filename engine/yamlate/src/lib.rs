//! Yamlate - embedded YAML expression engine.
//!
//! A YAML document is parsed into a [`Value`] tree whose nodes may encode
//! expressions. Evaluating a node against an [`Environment`] produces a new
//! owned [`Value`]:
//!
//! ```text
//! blah: 2
//! foo: [+, 5, 5]                 # evaluates to 10
//! wing_color:
//!   case: $current_season        # picks a branch from the environment
//!   spring: red
//!   default: brown
//! ```
//!
//! # Crates
//!
//! - `yamlate_ir`: value model, type tags, error taxonomy, operator table
//! - `yamlate_parse`: YAML loading and inline `~>` expression parsing
//! - `yamlate_eval`: environment and evaluator
//! - this crate: the handle-based [`Session`] boundary and logging setup

pub mod handle;
pub mod session;

use std::sync::Once;

pub use handle::{Handle, HandleTable};
pub use session::{EnvHandle, ReturnValue, Session, ValueHandle};
pub use yamlate_eval::{
    evaluate, Binding, Environment, Evaluator, EvaluatorBuilder, DEFAULT_MAX_DEPTH,
};
pub use yamlate_ir::{Category, Error, ErrorCode, ErrorKind, Expr, Hash, Tag, Value, YamlResult};
pub use yamlate_parse::{parse, parse_all, parse_inline, parse_str};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Only the first call has an effect. Without `RUST_LOG`, or when the host
/// already installed a global subscriber, nothing changes. Binding layers
/// call this when they load the engine; `RUST_LOG=yamlate_eval=trace`
/// follows operator dispatch and branch selection.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    TRACING_INIT.call_once(|| {
        let Ok(filter) = EnvFilter::try_from_default_env() else {
            return;
        };
        let installed = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init();
        if let Err(error) = installed {
            tracing::debug!(%error, "keeping existing subscriber");
        }
    });
}
