//! App lifecycle requests.

use campus_flux::request;

/// Reset to the signed-out shell.
#[request("app/initialize")]
pub struct InitializeReq;

/// Route change. The sidebar follows with auto-expansion.
#[request("app/navigate")]
pub struct NavigateReq {
    pub path: String,
}
