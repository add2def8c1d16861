//! Ambient generation context behind [`Gen::pick`].
//!
//! A context is opened by a combinator such as [`exec`](crate::exec) for the
//! duration of one invocation and is visible only to the current thread. Contexts
//! nest: opening one saves the enclosing context and closing it restores the
//! enclosing one, on every exit path including unwinding.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use crate::any::Any;
use crate::error::GenError;
use crate::generator::Gen;

/// Receives the picks made while a context is active
pub trait GenerationHandler {
    /// Produce the value for one pick of `generator`
    fn on_generate(&mut self, generator: &Gen<Any>) -> Result<Any, GenError>;
}

type SharedHandler = Rc<RefCell<dyn GenerationHandler>>;

// `None` entries mask the context below them while a handler is servicing a pick.
thread_local! {
    static HANDLERS: RefCell<Vec<Option<SharedHandler>>> = const { RefCell::new(Vec::new()) };
}

/// Restores the previous context when dropped
struct ContextGuard {
    depth: usize,
}

impl ContextGuard {
    fn push(handler: Option<SharedHandler>) -> Self {
        let depth = HANDLERS.with(|stack| {
            let mut stack = stack.borrow_mut();
            stack.push(handler);
            stack.len()
        });
        Self { depth }
    }
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        // The thread-local may already be gone during thread teardown.
        let _ = HANDLERS.try_with(|stack| stack.borrow_mut().truncate(self.depth - 1));
    }
}

/// Run `f` with `handler` as the active context
pub fn with_handler<H, R>(handler: Rc<RefCell<H>>, f: impl FnOnce() -> R) -> R
where
    H: GenerationHandler + 'static,
{
    let handler: SharedHandler = handler;
    let guard = ContextGuard::push(Some(handler));
    trace!(depth = guard.depth, "generation context opened");
    let result = f();
    trace!(depth = guard.depth, "generation context closed");
    result
}

/// Run `f` with no active context, hiding any enclosing one
pub fn without_context<R>(f: impl FnOnce() -> R) -> R {
    let _guard = ContextGuard::push(None);
    f()
}

/// Whether a `pick` made right now would reach a handler
pub fn has_active_context() -> bool {
    HANDLERS.with(|stack| matches!(stack.borrow().last(), Some(Some(_))))
}

pub(crate) fn pick_erased(generator: &Gen<Any>) -> Result<Any, GenError> {
    let handler = HANDLERS
        .with(|stack| stack.borrow().last().cloned().flatten())
        .ok_or(GenError::NoActiveContext)?;

    // Strategies run by the handler must not re-enter it.
    let _mask = ContextGuard::push(None);
    let result = handler.borrow_mut().on_generate(generator);
    result
}
