use crate::structs::request_ticket::OptimizeRequest;

/// Outcome of dispatching a walker action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEffect {
    /// Guard failed; state untouched.
    Ignored,
    Updated,
    /// The walker moved to `Optimizing`; the caller must send this request.
    Optimize(OptimizeRequest),
}
