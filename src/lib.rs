// ThreatSleuth client: submit a file for malware classification and render
// the verdict.
//
// This is the library root. `intake` owns the request lifecycle and the
// analysis state, `interpret` turns a result into display values, and
// `backend` is the boundary to the classification API.

pub mod backend;
pub mod config;
pub mod error;
pub mod intake;
pub mod interpret;
pub mod output;
