// Library root
// -----------
// The binary (`main.rs`) wires these modules into the interactive
// headline classifier.
//
// Module responsibilities:
// - `config`: Resolves the endpoint, credential and topic set from the
//   environment once at startup.
// - `api`: Sends a headline to the zero-shot classification endpoint and
//   decodes the per-topic scores.
// - `report`: Pure formatting of the best guess, the ranked top 3 and the
//   confidence bars.
// - `ui`: The read loop that ties input, classification and output
//   together and never lets a failed request end the session.
pub mod api;
pub mod config;
pub mod report;
pub mod ui;
