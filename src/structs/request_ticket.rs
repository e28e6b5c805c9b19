use crate::enums::request_slot::RequestSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub slot: RequestSlot,
    pub seq: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizeRequest {
    pub ticket: RequestTicket,
    /// Content the issues were detected against.
    pub code: String,
    /// JSON array of the selected issues.
    pub prompt: String,
}
