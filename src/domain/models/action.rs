use super::TurnRequest;

pub enum Action {
    BackendAbort(),
    BackendRequest(TurnRequest),
}
