use ccbp::io::ext_repr::{ExtCCBPInstance, ExtCCBPSolution};
use serde::{Deserialize, Serialize};

use crate::config::SAHHConfig;

#[derive(Serialize, Deserialize, Clone)]
pub struct CCBPOutput {
    #[serde(flatten)]
    pub instance: ExtCCBPInstance,
    pub solution: ExtCCBPSolution,
    pub config: SAHHConfig,
}
